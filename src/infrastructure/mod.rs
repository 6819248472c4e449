pub mod passiv_client;
