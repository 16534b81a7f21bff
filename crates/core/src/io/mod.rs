//! I/O operations for reading and writing horizon survey files

mod text;

pub use text::{
    format_point, read_horizon, read_horizon_from_buffer, write_horizon, write_horizon_to_buffer,
    HorizonFile, END_OF_HEADER,
};
