pub mod explorer;
pub mod panels;
pub mod plot;
