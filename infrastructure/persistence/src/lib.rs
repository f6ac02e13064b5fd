pub mod db;
pub mod history {
    pub mod entity;
    pub mod local;
    pub mod remote;
}
