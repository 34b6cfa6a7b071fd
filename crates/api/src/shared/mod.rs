pub mod auth;
pub mod guard;
#[cfg(test)]
pub mod test_fakes;
pub mod usecase;
