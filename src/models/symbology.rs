use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Barcode symbology supported by the studio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbology {
    /// Aztec Code
    #[serde(rename = "AZTEC")]
    Aztec,
    /// Codabar (NW-7)
    #[serde(rename = "CODABAR")]
    Codabar,
    /// Code 39
    #[serde(rename = "CODE_39")]
    Code39,
    /// Code 93
    #[serde(rename = "CODE_93")]
    Code93,
    /// Code 128
    #[serde(rename = "CODE_128")]
    Code128,
    /// GS1 DataBar Omnidirectional
    #[serde(rename = "DATABAR")]
    DataBar,
    /// GS1 DataBar Expanded
    #[serde(rename = "DATABAR_EXPANDED")]
    DataBarExpanded,
    /// Data Matrix (ECC 200)
    #[serde(rename = "DATA_MATRIX")]
    DataMatrix,
    /// EAN-8
    #[serde(rename = "EAN_8")]
    Ean8,
    /// EAN-13
    #[serde(rename = "EAN_13")]
    Ean13,
    /// Interleaved 2 of 5
    #[serde(rename = "ITF")]
    Itf,
    /// MaxiCode
    #[serde(rename = "MAXICODE")]
    MaxiCode,
    /// Micro QR Code
    #[serde(rename = "MICRO_QR_CODE")]
    MicroQr,
    /// MSI Plessey
    #[serde(rename = "MSI")]
    Msi,
    /// PDF417
    #[serde(rename = "PDF_417")]
    Pdf417,
    /// Plessey
    #[serde(rename = "PLESSEY")]
    Plessey,
    /// QR Code (Model 2)
    #[serde(rename = "QR_CODE")]
    QrCode,
    /// UPC-A
    #[serde(rename = "UPC_A")]
    UpcA,
    /// UPC-E
    #[serde(rename = "UPC_E")]
    UpcE,
}

/// Whether a symbology stores data in one or two dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Linear (bar/space) symbology
    #[serde(rename = "1D")]
    OneD,
    /// Matrix or stacked symbology
    #[serde(rename = "2D")]
    TwoD,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::OneD => write!(f, "1D"),
            Dimension::TwoD => write!(f, "2D"),
        }
    }
}

/// Which symbology-specific sub-options the codec consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSet {
    /// Width and height only
    Basic,
    /// Error correction level and GS1 flag
    Qr,
    /// GS1 flag
    DataMatrix,
    /// GS1 flag, encoded without built-in margin
    Code128,
    /// Error correction level and compact flag
    Pdf417,
    /// Error correction percentage
    Aztec,
}

/// How the human-readable label printed under a linear symbol is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Content is printed as given
    Verbatim,
    /// Mod-10 check digit appended when the content is one digit short
    CheckDigit {
        /// Length including the check digit
        full_len: usize,
    },
    /// UPC-E zero-suppressed; check digit comes from the UPC-A expansion
    UpcE,
}

/// Fixed per-symbology attributes.
///
/// Every component that branches on symbology reads this row instead of
/// matching on [`Symbology`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbologyInfo {
    /// Human-readable name
    pub name: &'static str,
    /// Canonical identifier (`QR_CODE`, `EAN_13`, ...)
    pub id: &'static str,
    /// Linear or matrix
    pub dimension: Dimension,
    /// Whether GS1 encoding can be requested
    pub supports_gs1: bool,
    /// Margin the codec adds around the symbol, in modules
    pub codec_margin: u32,
    /// Sub-options handed to the codec
    pub params: ParamSet,
    /// Printed label derivation
    pub label: LabelRule,
}

const fn row(
    name: &'static str,
    id: &'static str,
    dimension: Dimension,
    supports_gs1: bool,
    codec_margin: u32,
    params: ParamSet,
    label: LabelRule,
) -> SymbologyInfo {
    SymbologyInfo {
        name,
        id,
        dimension,
        supports_gs1,
        codec_margin,
        params,
        label,
    }
}

use Dimension::{OneD, TwoD};

static AZTEC: SymbologyInfo = row("Aztec", "AZTEC", TwoD, false, 0, ParamSet::Aztec, LabelRule::Verbatim);
static CODABAR: SymbologyInfo = row("Codabar", "CODABAR", OneD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static CODE_39: SymbologyInfo = row("Code 39", "CODE_39", OneD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static CODE_93: SymbologyInfo = row("Code 93", "CODE_93", OneD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static CODE_128: SymbologyInfo = row("Code 128", "CODE_128", OneD, true, 0, ParamSet::Code128, LabelRule::Verbatim);
static DATABAR: SymbologyInfo = row("DataBar", "DATABAR", OneD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static DATABAR_EXPANDED: SymbologyInfo = row(
    "DataBar Expanded",
    "DATABAR_EXPANDED",
    OneD,
    false,
    0,
    ParamSet::Basic,
    LabelRule::Verbatim,
);
static DATA_MATRIX: SymbologyInfo = row("Data Matrix", "DATA_MATRIX", TwoD, true, 0, ParamSet::DataMatrix, LabelRule::Verbatim);
static EAN_8: SymbologyInfo = row("EAN-8", "EAN_8", OneD, false, 0, ParamSet::Basic, LabelRule::CheckDigit { full_len: 8 });
static EAN_13: SymbologyInfo = row("EAN-13", "EAN_13", OneD, false, 0, ParamSet::Basic, LabelRule::CheckDigit { full_len: 13 });
static ITF: SymbologyInfo = row("ITF", "ITF", OneD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static MAXICODE: SymbologyInfo = row("MaxiCode", "MAXICODE", TwoD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static MICRO_QR: SymbologyInfo = row("Micro QR Code", "MICRO_QR_CODE", TwoD, false, 0, ParamSet::Basic, LabelRule::Verbatim);
static MSI: SymbologyInfo = row("MSI", "MSI", OneD, false, 1, ParamSet::Basic, LabelRule::Verbatim);
static PDF_417: SymbologyInfo = row("PDF417", "PDF_417", TwoD, false, 0, ParamSet::Pdf417, LabelRule::Verbatim);
static PLESSEY: SymbologyInfo = row("Plessey", "PLESSEY", OneD, false, 1, ParamSet::Basic, LabelRule::Verbatim);
static QR_CODE: SymbologyInfo = row("QR Code", "QR_CODE", TwoD, true, 0, ParamSet::Qr, LabelRule::Verbatim);
static UPC_A: SymbologyInfo = row("UPC-A", "UPC_A", OneD, false, 0, ParamSet::Basic, LabelRule::CheckDigit { full_len: 12 });
static UPC_E: SymbologyInfo = row("UPC-E", "UPC_E", OneD, false, 0, ParamSet::Basic, LabelRule::UpcE);

impl Symbology {
    /// Every supported symbology, in identifier order
    pub const ALL: [Symbology; 19] = [
        Symbology::Aztec,
        Symbology::Codabar,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Code128,
        Symbology::DataBar,
        Symbology::DataBarExpanded,
        Symbology::DataMatrix,
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::Itf,
        Symbology::MaxiCode,
        Symbology::MicroQr,
        Symbology::Msi,
        Symbology::Pdf417,
        Symbology::Plessey,
        Symbology::QrCode,
        Symbology::UpcA,
        Symbology::UpcE,
    ];

    /// Look up the fixed attributes of this symbology
    pub fn info(self) -> &'static SymbologyInfo {
        match self {
            Symbology::Aztec => &AZTEC,
            Symbology::Codabar => &CODABAR,
            Symbology::Code39 => &CODE_39,
            Symbology::Code93 => &CODE_93,
            Symbology::Code128 => &CODE_128,
            Symbology::DataBar => &DATABAR,
            Symbology::DataBarExpanded => &DATABAR_EXPANDED,
            Symbology::DataMatrix => &DATA_MATRIX,
            Symbology::Ean8 => &EAN_8,
            Symbology::Ean13 => &EAN_13,
            Symbology::Itf => &ITF,
            Symbology::MaxiCode => &MAXICODE,
            Symbology::MicroQr => &MICRO_QR,
            Symbology::Msi => &MSI,
            Symbology::Pdf417 => &PDF_417,
            Symbology::Plessey => &PLESSEY,
            Symbology::QrCode => &QR_CODE,
            Symbology::UpcA => &UPC_A,
            Symbology::UpcE => &UPC_E,
        }
    }

    /// Linear or matrix
    pub fn dimension(self) -> Dimension {
        self.info().dimension
    }

    /// Whether GS1 encoding can be requested
    pub fn supports_gs1(self) -> bool {
        self.info().supports_gs1
    }

    /// Check if this is a linear symbology
    pub fn is_1d(self) -> bool {
        self.dimension() == Dimension::OneD
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// Error returned when a symbology name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbology: {0}")]
pub struct UnknownSymbology(pub String);

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_uppercase)
        .collect()
}

impl FromStr for Symbology {
    type Err = UnknownSymbology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        let alias = match wanted.as_str() {
            "QR" => Some(Symbology::QrCode),
            "MICROQR" => Some(Symbology::MicroQr),
            "PDF" => Some(Symbology::Pdf417),
            "RSS14" => Some(Symbology::DataBar),
            "RSSEXPANDED" => Some(Symbology::DataBarExpanded),
            _ => None,
        };
        if let Some(symbology) = alias {
            return Ok(symbology);
        }
        Symbology::ALL
            .iter()
            .copied()
            .find(|sym| normalize(sym.info().id) == wanted || normalize(sym.info().name) == wanted)
            .ok_or_else(|| UnknownSymbology(s.to_string()))
    }
}
