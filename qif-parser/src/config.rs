use qif_core::DateFormat;
use typed_builder::TypedBuilder;

/// Options for constructing a [`Reader`](crate::Reader).
///
/// ```
/// use qif_parser::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .date_format("mm/dd/yy".parse().unwrap())
///     .build();
/// assert_eq!(config.date_format.unwrap().tag(), "mm/dd/yy");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct ReaderConfig {
    /// The document's date format. Guessed from the data when absent.
    #[builder(default, setter(strip_option))]
    pub date_format: Option<DateFormat>,

    /// Used when the format is not given and no date in the data gives it away.
    #[builder(default)]
    pub fallback_date_format: DateFormat,
}
