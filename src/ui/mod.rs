pub mod ansi;
pub mod cell;
pub mod table_printer;
pub mod width_util;
