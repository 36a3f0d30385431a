//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;

    /// Comma-separated unsigned integers. `None` when the key is absent;
    /// `Some(Err(token))` names the first token that is not a number.
    fn get_usize_list(&self, section: &str, key: &str) -> Option<Result<Vec<usize>, String>> {
        let raw = self.get_string(section, key)?;
        let parsed = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| token.parse::<usize>().map_err(|_| token.to_string()))
            .collect();
        Some(parsed)
    }
}
