use std::path::PathBuf;

use clap::{arg, value_parser, ArgMatches, Command};
use cloudpay_lib::core::simulator::{
    PaymentFormData, PaymentStatus, SimulationFeedback, UsdtCurrencyCode,
};
use cloudpay_lib::external_services::webhook::WebhookForwarder;

pub mod state;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

fn cli() -> Command {
    Command::new("cloudpay")
        .about("CloudPay mock CLI - Payment webhook simulator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate-payment")
                .about("Sends a simulated payment webhook; omitted values come from the last run")
                .arg(arg!(--"callback-url" <URL> "Callback webhook URL"))
                .arg(
                    arg!(--network <CODE> "USDT network, e.g. USDT_TRC20")
                        .value_parser(value_parser!(UsdtCurrencyCode)),
                )
                .arg(arg!(--amount <AMOUNT> "USDT amount"))
                .arg(arg!(--"order-id" <ORDER_ID> "Customer identifier (order_id)"))
                .arg(arg!(--"invoice-id" <INVOICE_ID> "Invoice ID"))
                .arg(
                    arg!(--status <STATUS> "success or failed")
                        .value_parser(value_parser!(PaymentStatus)),
                )
                .arg(
                    arg!(--server <URL> "Server whose /api/proxy-webhook relays the webhook")
                        .env("SIMULATOR_SERVER_URL")
                        .default_value(DEFAULT_SERVER_URL),
                )
                .arg(arg!(--direct "Post to the callback URL directly instead of through the server"))
                .arg(
                    arg!(--"state-file" <PATH> "Where the last form values are kept")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("networks").about("Lists the supported USDT networks"))
}

/// Saved form with every flag given on the command line applied on top.
fn merge_form(mut form: PaymentFormData, matches: &ArgMatches) -> PaymentFormData {
    let text = |id: &str| matches.get_one::<String>(id).cloned();
    if let Some(callback_url) = text("callback-url") {
        form.callback_url = callback_url;
    }
    if let Some(amount) = text("amount") {
        form.amount = amount;
    }
    if let Some(order_id) = text("order-id") {
        form.order_id = order_id;
    }
    if let Some(invoice_id) = text("invoice-id") {
        form.invoice_id = invoice_id;
    }
    if let Some(currency) = matches.get_one::<UsdtCurrencyCode>("network") {
        form.currency = *currency;
    }
    if let Some(status) = matches.get_one::<PaymentStatus>("status") {
        form.status = *status;
    }
    form
}

/// Names of the required fields that are still empty.
fn missing_fields(form: &PaymentFormData) -> Vec<&'static str> {
    [
        ("--callback-url", &form.callback_url),
        ("--order-id", &form.order_id),
        ("--invoice-id", &form.invoice_id),
        ("--amount", &form.amount),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(flag, _)| flag)
    .collect()
}

async fn simulate_payment(matches: &ArgMatches) -> SimulationFeedback {
    let state_path = matches
        .get_one::<PathBuf>("state-file")
        .cloned()
        .unwrap_or_else(state::default_state_path);
    let form = merge_form(state::load(&state_path), matches);
    if let Err(e) = state::save(&state_path, &form) {
        log::warn!("{}", e);
    }

    let missing = missing_fields(&form);
    if !missing.is_empty() {
        return SimulationFeedback {
            success: false,
            message: format!("Missing required values: {}", missing.join(", ")),
        };
    }

    let forwarder = WebhookForwarder::new();
    let answer = if matches.get_flag("direct") {
        match form.to_proxy_request() {
            Ok(request) => match forwarder.forward(request).await {
                Ok(relay) => serde_json::to_value(relay).map_err(Into::into),
                Err(e) => Err(e),
            },
            Err(e) => Err(e.into()),
        }
    } else {
        let server = matches
            .get_one::<String>("server")
            .map(String::as_str)
            .unwrap_or(DEFAULT_SERVER_URL);
        forwarder.send_through_proxy(server, &form).await
    };

    match answer {
        Ok(response) => SimulationFeedback::from_proxy_response(&response),
        Err(e) => SimulationFeedback {
            success: false,
            message: format!("Error sending webhook: {}", e),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    cloudpay_lib::config::init();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("simulate-payment", sub_matches)) => {
            let feedback = simulate_payment(sub_matches).await;
            if feedback.success {
                println!("✓ Success: {}", feedback.message);
            } else {
                eprintln!("✗ Error: {}", feedback.message);
                std::process::exit(1);
            }
        }
        Some(("networks", _)) => {
            for currency in UsdtCurrencyCode::ALL {
                println!("{:<11} {:<13} {}", currency.code(), currency.label(), currency.description());
            }
        }
        _ => {
            println!("No subcommand was used");
        }
    }
    Ok(())
}
