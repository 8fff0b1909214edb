use std::fmt;

/// A remote lookup offered by the upstream data source.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Lookup {
    /// Symbol search by keyword.
    Search,
    /// Index movers list.
    Movers,
    /// Price series for one symbol.
    Prices,
}

impl Lookup {
    pub const ALL: [Lookup; 3] = [Lookup::Search, Lookup::Movers, Lookup::Prices];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Movers => "movers",
            Self::Prices => "prices",
        }
    }

    /// Object keys that may carry the result array in a response envelope,
    /// in lookup order.
    pub const fn envelope_keys(self) -> &'static [&'static str] {
        match self {
            Self::Search => &["results", "data"],
            Self::Movers => &["movers"],
            Self::Prices => &["prices"],
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
