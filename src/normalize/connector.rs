//! Connector tagging: per-unit socket counts and power outputs.

/// One socket type present on a charging unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Socket {
    pub count: u32,
    /// Rated output in kW, truncated to a whole number.
    pub output_kw: Option<u32>,
}

/// The four socket types tracked by the import, keyed to their OSM tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocketSet {
    /// `socket:type1` — J1772 (AC).
    pub type1: Option<Socket>,
    /// `socket:type1_combo` — CCS.
    pub type1_combo: Option<Socket>,
    /// `socket:chademo` — CHAdeMO.
    pub chademo: Option<Socket>,
    /// `socket:nacs` — J3400 / NACS.
    pub nacs: Option<Socket>,
}

impl SocketSet {
    pub fn from_columns(
        j1772: (Option<f64>, Option<f64>),
        ccs: (Option<f64>, Option<f64>),
        chademo: (Option<f64>, Option<f64>),
        j3400: (Option<f64>, Option<f64>),
    ) -> Self {
        Self {
            type1: socket(j1772.0, j1772.1),
            type1_combo: socket(ccs.0, ccs.1),
            chademo: socket(chademo.0, chademo.1),
            nacs: socket(j3400.0, j3400.1),
        }
    }

    /// Slots in fixed tag order, for serializers that iterate the set.
    pub fn slots(&self) -> [(&'static str, Option<Socket>); 4] {
        [
            ("socket:type1", self.type1),
            ("socket:type1_combo", self.type1_combo),
            ("socket:chademo", self.chademo),
            ("socket:nacs", self.nacs),
        ]
    }

    /// True when any AC (J1772) socket is present.
    pub fn has_ac(&self) -> bool {
        self.type1.is_some()
    }

    /// True when any DC fast socket (CCS, CHAdeMO, NACS) is present.
    pub fn has_dc(&self) -> bool {
        self.type1_combo.is_some() || self.chademo.is_some() || self.nacs.is_some()
    }
}

/// A socket tag is only emitted when the unit reports at least one
/// connector of that type.
fn socket(count: Option<f64>, power_kw: Option<f64>) -> Option<Socket> {
    let count = count?;
    if count < 1.0 {
        return None;
    }
    Some(Socket {
        count: count as u32,
        output_kw: power_kw.map(|p| p.trunc() as u32),
    })
}
