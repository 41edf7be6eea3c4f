use anyhow::{ensure, Result};
use checkout_common::{Amount, PromptPayPayload};
use clap::Args;

use crate::config::Settings;

#[derive(Args)]
pub struct PayloadSubCommand {
    /// Amount in baht, e.g. 199.50
    amount: Amount,
}

pub fn payload(settings: &Settings, sub_command_args: &PayloadSubCommand) -> Result<()> {
    ensure!(!sub_command_args.amount.is_zero(), "Amount must be greater than zero");

    let payload = PromptPayPayload::new(settings.payee()?, sub_command_args.amount);

    println!("{payload}");

    Ok(())
}
