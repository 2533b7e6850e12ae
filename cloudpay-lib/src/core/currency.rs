use serde::{Deserialize, Serialize};

const ICON_CDN: &str = "https://cdn.cryptocloud.plus/currency";

/// Display object attached to every wallet response.
///
/// `id` is derived from a hash of the code and is not unique; it exists for
/// display and must not be used to identify a currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CurrencyObject {
    pub id: u32,
    pub code: String,
    pub short_code: String,
    pub name: String,
    pub is_email_required: bool,
    pub stablecoin: bool,
    pub icon_base: String,
    pub icon_network: Option<String>,
    pub icon_qr: String,
    pub order: i32,
    pub obj_network: CurrencyNetwork,
    pub enable: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CurrencyNetwork {
    pub code: String,
    pub id: u32,
    pub icon: String,
    pub fullname: String,
}

/// Build the currency object for a free-form code such as `USDT_TRC20`. Never fails.
pub fn make_currency_object(code: &str) -> CurrencyObject {
    let short_code = short_code(code);
    let lower = code.to_lowercase();

    CurrencyObject {
        id: hash_code(code).unsigned_abs() % 1000 + 1,
        code: code.to_string(),
        short_code: short_code.clone(),
        name: code.to_string(),
        is_email_required: false,
        stablecoin: is_stablecoin(code),
        icon_base: format!("{}/icons/main/{}.svg", ICON_CDN, lower),
        icon_network: None,
        icon_qr: format!("{}/icons/stroke/{}.svg", ICON_CDN, lower),
        order: 0,
        obj_network: CurrencyNetwork {
            code: network_code(code).to_string(),
            id: 1,
            icon: format!("{}/crypto/{}.svg", ICON_CDN, short_code),
            fullname: code.to_string(),
        },
        enable: true,
    }
}

/// Uppercased part before the first `_`; the whole code when that part is empty.
fn short_code(code: &str) -> String {
    code.split('_')
        .next()
        .filter(|head| !head.is_empty())
        .unwrap_or(code)
        .to_uppercase()
}

fn is_stablecoin(code: &str) -> bool {
    code.contains("USDT") || code.contains("USDC")
}

fn network_code(code: &str) -> &'static str {
    if code.contains("TRC20") {
        "TRC20"
    } else if code.contains("ERC20") {
        "ERC20"
    } else {
        "None"
    }
}

/// 32-bit `h * 31 + unit` over UTF-16 code units, wrapping on overflow.
fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}
