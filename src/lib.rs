pub mod generic {
    pub mod optional;
}
