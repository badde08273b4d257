// ============================================================
// CHART SPECIFICATIONS
// ============================================================
// Renderer-agnostic descriptions of the dashboard charts

use serde::{Deserialize, Serialize};

/// Chart color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Default,
    Pastel,
    Vivid,
    Mono,
}

const SAFE: &[&str] = &[
    "rgb(136, 204, 238)",
    "rgb(204, 102, 119)",
    "rgb(221, 204, 119)",
    "rgb(17, 119, 51)",
    "rgb(51, 34, 136)",
    "rgb(170, 68, 153)",
    "rgb(68, 170, 153)",
    "rgb(153, 153, 51)",
    "rgb(136, 34, 85)",
    "rgb(102, 17, 0)",
    "rgb(136, 136, 136)",
];

const SET2: &[&str] = &[
    "rgb(102,194,165)",
    "rgb(252,141,98)",
    "rgb(141,160,203)",
    "rgb(231,138,195)",
    "rgb(166,216,84)",
    "rgb(255,217,47)",
    "rgb(229,196,148)",
    "rgb(179,179,179)",
];

const BOLD: &[&str] = &[
    "rgb(127, 60, 141)",
    "rgb(17, 165, 121)",
    "rgb(57, 105, 172)",
    "rgb(242, 183, 1)",
    "rgb(231, 63, 116)",
    "rgb(128, 186, 90)",
    "rgb(230, 131, 16)",
    "rgb(0, 134, 149)",
    "rgb(207, 28, 144)",
    "rgb(249, 123, 114)",
    "rgb(165, 170, 153)",
];

const PRISM: &[&str] = &[
    "rgb(95, 70, 144)",
    "rgb(29, 105, 150)",
    "rgb(56, 166, 165)",
    "rgb(15, 133, 84)",
    "rgb(115, 175, 72)",
    "rgb(237, 173, 8)",
    "rgb(225, 124, 5)",
    "rgb(204, 80, 62)",
    "rgb(148, 52, 110)",
    "rgb(111, 64, 112)",
    "rgb(102, 102, 102)",
];

impl Palette {
    pub const ALL: [Palette; 4] = [
        Palette::Default,
        Palette::Pastel,
        Palette::Vivid,
        Palette::Mono,
    ];

    /// Qualitative color sequence for this theme
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Palette::Default => SAFE,
            Palette::Pastel => SET2,
            Palette::Vivid => BOLD,
            Palette::Mono => PRISM,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Default => "default",
            Palette::Pastel => "pastel",
            Palette::Vivid => "vivid",
            Palette::Mono => "mono",
        }
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bar chart of the Top-N rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    /// One category per bar, also the color key
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub x_title: String,
    pub y_title: String,
    /// Color per bar, cycling through the palette
    pub colors: Vec<String>,
}

/// Histogram of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub title: String,
    pub column: String,
    pub values: Vec<f64>,
    pub nbins: usize,
    pub colors: Vec<String>,
}
