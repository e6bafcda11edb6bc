//! Transaction reference generation.

use rand::Rng;
use rand::distributions::Uniform;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default prefix of generated references.
pub const DEFAULT_PREFIX: &str = "TX";

/// Default number of random characters.
pub const DEFAULT_SIZE: usize = 15;

/// Options for [`gen_tx_ref`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenTxRefOptions {
    /// Prefix placed before a `-`. Defaults to [`DEFAULT_PREFIX`].
    pub prefix: Option<String>,
    /// Number of random characters. Defaults to [`DEFAULT_SIZE`].
    pub size: Option<usize>,
    /// Emit only the random part.
    pub remove_prefix: bool,
}

impl GenTxRefOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn without_prefix(mut self) -> Self {
        self.remove_prefix = true;
        self
    }
}

/// Generates a random transaction reference such as `TX-3K9QZ0B7M1XW2AD`.
///
/// ```
/// use chapa::reference::{GenTxRefOptions, gen_tx_ref};
///
/// let tx_ref = gen_tx_ref(&GenTxRefOptions::default());
/// assert!(tx_ref.starts_with("TX-"));
/// assert_eq!(tx_ref.len(), 18);
/// ```
#[must_use]
pub fn gen_tx_ref(options: &GenTxRefOptions) -> String {
    let size = options.size.unwrap_or(DEFAULT_SIZE);
    let picks = Uniform::from(0..ALPHABET.len());
    let random: String = rand::thread_rng()
        .sample_iter(picks)
        .take(size)
        .map(|i| char::from(ALPHABET[i]))
        .collect();

    if options.remove_prefix {
        random
    } else {
        let prefix = options.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
        format!("{prefix}-{random}")
    }
}
