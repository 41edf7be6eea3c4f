use anyhow::Result;
use checkout::{ConfirmOutcome, PaymentForm};
use checkout_common::{Amount, OrderId, PaymentStatus};
use clap::Args;

use crate::config::Settings;
use crate::console::{ConsoleNavigator, ConsoleNotifier};

#[derive(Args)]
pub struct PaySubCommand {
    /// Order id
    order_id: OrderId,
    /// Amount in baht, e.g. 199.50
    amount: Amount,
    /// Confirm the payment once it was detected
    #[arg(long)]
    confirm: bool,
    /// Check rounds to run before giving up
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,
    /// Print the history as JSON when done
    #[arg(long)]
    json: bool,
}

pub async fn pay(settings: &Settings, sub_command_args: &PaySubCommand) -> Result<()> {
    let orders = settings.fake_orders.service();
    orders
        .add_order(sub_command_args.order_id.clone(), sub_command_args.amount)
        .await?;

    let form = PaymentForm::builder()
        .order_id(sub_command_args.order_id.clone())
        .total(sub_command_args.amount)
        .payee(settings.payee()?)
        .messages(settings.messages())
        .poll_config(settings.poll_config())
        .order_service(orders)
        .status_checker(settings.status_checker()?)
        .notifier(ConsoleNotifier)
        .navigator(ConsoleNavigator)
        .build()?;

    println!("{}", form.render().await);

    let mut status = form.subscribe_status();

    for round in 1..=sub_command_args.rounds {
        println!("Check round {}/{}", round, sub_command_args.rounds);
        form.start_payment_check().await?;

        let finished = *status
            .wait_for(|status| *status != PaymentStatus::Checking)
            .await?;

        if finished == PaymentStatus::Completed {
            break;
        }
    }

    if form.status().await == PaymentStatus::Completed {
        if sub_command_args.confirm {
            match form.confirm_payment().await? {
                ConfirmOutcome::Confirmed => {
                    println!("Order {} marked paid", form.order_id());
                }
                ConfirmOutcome::Rejected { message } => {
                    println!("Confirmation rejected: {message}");
                }
            }
        } else {
            println!("Payment detected, pass --confirm to mark the order paid");
        }
    } else {
        println!(
            "No payment detected after {} round(s)",
            sub_command_args.rounds
        );
    }

    println!("{}", form.render().await);

    if sub_command_args.json {
        println!("{}", serde_json::to_string_pretty(&form.history().await)?);
    }

    Ok(())
}
