pub mod activity;
pub mod email;
pub mod summary;
pub mod user;

#[cfg(test)]
pub(crate) mod test_doubles;
