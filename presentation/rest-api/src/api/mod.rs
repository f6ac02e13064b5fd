pub mod error;
pub mod tags;
pub mod health {
    pub mod routes;
}
pub mod history {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod lookup {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
