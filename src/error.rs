use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Connectivity or query failure reported by the series source.
    #[error("data fetch failed: {0}")]
    DataFetch(String),

    /// The source answered successfully but returned no rows.
    #[error("no data returned for category `{category}`")]
    EmptyResult { category: String },

    /// Drag selection collapsed to zero width or height.
    #[error("drag selection is degenerate")]
    DegenerateSelection,

    #[error("invalid filter selection: {0}")]
    InvalidSelection(String),

    #[error("pointer is outside the plot area")]
    PointerOutsidePlot,
}

impl ChartError {
    /// Returns `true` for errors that belong to one reload attempt and must be
    /// shown to the user without touching the rendered chart.
    #[must_use]
    pub fn is_reload_notification(&self) -> bool {
        matches!(self, Self::DataFetch(_) | Self::EmptyResult { .. })
    }
}
