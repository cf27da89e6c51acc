pub mod itens_do_pedido;
pub mod pedidos;
pub mod produtos;
