pub mod cliente;
pub mod item_do_pedido;
pub mod pedido;
pub mod produto;
pub mod timestamp;
