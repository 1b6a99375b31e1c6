pub mod line_pay;
pub mod messenger;
