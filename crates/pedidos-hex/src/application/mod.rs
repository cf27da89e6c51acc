pub mod item_do_pedido_service;
pub mod pedido_service;
pub mod produto_service;
pub mod validation;
