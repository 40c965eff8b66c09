//! Display-notation selector.

/// Which renderer a display consumer wants for `ScaledNumber` values.
///
/// `Standard` is the long-scale named form (`2.5 million`); the other two
/// are the raw mantissa/exponent forms.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
    #[default]
    Standard,
    Scientific,
    Engineering,
}
