pub mod connect_four;
