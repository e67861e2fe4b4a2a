pub mod csv_handler;
