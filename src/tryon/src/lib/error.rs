/// The type to represent CLI results.
pub type TryonResult<T = ()> = anyhow::Result<T>;

/// The type to represent CLI errors.
pub type TryonError = anyhow::Error;
