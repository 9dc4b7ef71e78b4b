pub mod customer_controller;
pub mod inventory_controller;
pub mod mechanic_controller;
pub mod service_ticket_controller;
pub mod vehicle_controller;
