use rand::{distributions::Alphanumeric, Rng};

/// Creates an alphanumeric secret, used for the reminder trigger key
/// when none is configured
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_random_secret() {
        let sec1 = create_random_secret(30);
        let sec2 = create_random_secret(30);
        assert_eq!(sec1.len(), 30);
        assert_ne!(sec1, sec2);
        assert!(sec1.chars().all(|c| c.is_ascii_alphanumeric()));

        assert!(create_random_secret(0).is_empty());
    }
}
