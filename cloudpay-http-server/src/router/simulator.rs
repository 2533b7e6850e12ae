use actix_web::{get, http::header::ContentType, HttpResponse};
use cloudpay_lib::core::simulator::{PaymentStatus, UsdtCurrencyCode, STORAGE_KEY};

const SIMULATOR_TEMPLATE: &str = include_str!("../../static/simulate-payment.html");

/// Payment simulator page. The form is driven by the inline script and posts to `/api/proxy-webhook`.
#[get("/simulate-payment")]
pub async fn simulate_payment() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_simulator_page())
}

pub fn render_simulator_page() -> String {
    SIMULATOR_TEMPLATE
        .replace("{{NETWORK_OPTIONS}}", &network_options())
        .replace("{{STORAGE_KEY}}", STORAGE_KEY)
        .replace("{{DEFAULT_CURRENCY}}", UsdtCurrencyCode::default().code())
        .replace("{{DEFAULT_STATUS}}", PaymentStatus::default().as_str())
}

fn network_options() -> String {
    UsdtCurrencyCode::ALL
        .iter()
        .map(|currency| {
            format!(
                r#"<label class="network-option">
            <input type="radio" name="currency" value="{code}" class="radio" />
            <div class="network-label">
              <span class="network-name">{label}</span>
              <span class="network-desc">{description}</span>
            </div>
          </label>"#,
                code = currency.code(),
                label = currency.label(),
                description = currency.description(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}
