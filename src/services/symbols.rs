// src/services/symbols.rs
use serde::Serialize;

/// Native index symbols on the charting provider.
pub const PRIMARY_SYMBOLS: &[(&str, &str)] = &[
    // US indices
    ("^GSPC", "SP:SPX"),
    ("^NDX", "NASDAQ:NDX"),
    // HK indices
    ("^HSI", "HSI"),
    ("^HSTECH", "HSI:TECH"),
    // CN indices
    ("000001.SS", "SSE:000001"),
    ("000300.SH", "SSE:000300"),
];

/// Tradable proxies (ETFs, alternate listings) for when the native index
/// symbol cannot be charted.
pub const FALLBACK_SYMBOLS: &[(&str, &str)] = &[
    ("^GSPC", "AMEX:SPY"),
    ("^NDX", "NASDAQ:QQQ"),
    ("^HSI", "HKEX:2800"),
    ("^HSTECH", "HKEX:3067"),
    ("000001.SS", "SSE:000001"),
    ("000300.SH", "SZSE:399300"),
    // alternate codes the data pipeline falls back to
    ("000001.SH", "SSE:000001"),
    ("399300.SZ", "SZSE:399300"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolTier {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSymbol {
    pub symbol: &'static str,
    pub tier: SymbolTier,
}

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

/// Primary table first, then fallback. Primary wins when a code is in both.
pub fn resolve_symbol(code: &str) -> Option<ChartSymbol> {
    resolve_in(PRIMARY_SYMBOLS, FALLBACK_SYMBOLS, code)
}

pub fn resolve_in(
    primary: &[(&'static str, &'static str)],
    fallback: &[(&'static str, &'static str)],
    code: &str,
) -> Option<ChartSymbol> {
    if let Some(symbol) = lookup(primary, code) {
        return Some(ChartSymbol { symbol, tier: SymbolTier::Primary });
    }
    lookup(fallback, code).map(|symbol| ChartSymbol { symbol, tier: SymbolTier::Fallback })
}
