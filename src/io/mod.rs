pub mod docx_file;
pub mod grid_write;
pub mod table_read;
