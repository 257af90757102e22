use crate::infra::InMemorySession;
use crate::routes::build_services;
use chrono::{Duration, Utc};
use clap::Args;
use std::sync::Arc;
use urbanfix::auth::{BankAccount, RegisterInput, Role};
use urbanfix::config::AppConfig;
use urbanfix::error::AppError;
use urbanfix::marketplace::bookings::{final_amount, CompletionContext};
use urbanfix::marketplace::catalog::{PriceType, ServiceFilter, ServiceSort};
use urbanfix::marketplace::ledger::PayoutRequest;
use urbanfix::marketplace::portfolio::PortfolioCreate;
use urbanfix::marketplace::registration::{
    submit_registration, BasicInfo, RegistrationWizard, ServiceDraft,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Days from now to schedule the demo booking
    #[arg(long, default_value_t = 2)]
    pub(crate) schedule_days: i64,
    /// Skip the payout portion of the demo
    #[arg(long)]
    pub(crate) skip_payout: bool,
}

/// Walk the whole marketplace once: partner onboarding, catalog browsing,
/// a booking through its lifecycle, and the resulting earnings and payout.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = build_services(config.policy);

    println!("UrbanFix marketplace demo");

    println!("\nPartner onboarding");
    let wizard = RegistrationWizard::new(Arc::new(InMemorySession::default()));
    wizard.set_basic_info(BasicInfo {
        user_name: "Ravi Menon".to_string(),
        email: "ravi@urbanfix.example".to_string(),
        phone_number: "9876543210".to_string(),
        password: "hunter2!demo".to_string(),
        confirm_password: "hunter2!demo".to_string(),
    })?;
    wizard.set_selected_categories(vec!["cat-cleaning".to_string()])?;
    wizard.add_service_draft(
        "cat-cleaning",
        ServiceDraft {
            title: "Bathroom Deep Clean".to_string(),
            description: "Full scrub, descaling, and sanitization".to_string(),
            price_type: PriceType::Hourly,
            price: 1500.0,
            duration: 120,
            has_offer: true,
            offer_title: "Monsoon offer".to_string(),
            offer_discount: 20.0,
        },
    )?;
    wizard.add_service_draft(
        "cat-cleaning",
        ServiceDraft {
            title: "Sofa Shampooing".to_string(),
            description: String::new(),
            price_type: PriceType::Hourly,
            price: 600.0,
            duration: 60,
            has_offer: false,
            offer_title: String::new(),
            offer_discount: 0.0,
        },
    )?;

    let outcome = submit_registration(&wizard, &services.auth, &services.catalog).await?;
    let partner_id = outcome.partner.user.id.clone();
    println!(
        "- Registered partner {} ({}) with {} listings",
        outcome.partner.user.user_name,
        partner_id,
        outcome.created_services.len()
    );

    services
        .profile
        .set_bank_account(
            &partner_id,
            BankAccount {
                account_holder: "Ravi Menon".to_string(),
                account_number: "001122334455".to_string(),
                ifsc: "UFIX0001234".to_string(),
                bank_name: "Federal Bank".to_string(),
            },
        )
        .await?;
    let sample = services
        .portfolio
        .create(PortfolioCreate {
            partner_id: partner_id.clone(),
            image_url: "https://cdn.urbanfix.example/bathroom-before-after.jpg".to_string(),
            caption: "Bathroom deep clean, before and after".to_string(),
        })
        .await?;
    println!("- Saved bank details and portfolio sample \"{}\"", sample.caption);

    println!("\nCatalog browsing (active cleaning services, cheapest first)");
    let filter = ServiceFilter {
        category_id: Some("cat-cleaning".to_string()),
        active: Some(true),
        ..ServiceFilter::default()
    };
    let matches = services
        .catalog
        .search(&filter, Some(ServiceSort::PriceAsc))
        .await?;
    for enriched in &matches {
        println!(
            "- {} | final price {:.0} | {} reviews",
            enriched.service.title, enriched.final_price, enriched.total_reviews
        );
    }
    let picked = matches
        .iter()
        .find(|enriched| enriched.service.has_offer)
        .or_else(|| matches.first())
        .cloned()
        .ok_or_else(|| {
            AppError::Store(urbanfix::store::StoreError::not_found("service", "any"))
        })?;

    println!("\nCustomer booking");
    let customer = services
        .auth
        .register(RegisterInput {
            user_name: "Asha Nair".to_string(),
            phone_number: "9000000001".to_string(),
            role: Role::User,
            email: "asha@urbanfix.example".to_string(),
            password: "sekret!demo1".to_string(),
            bio: None,
        })
        .await?;

    let booking = services
        .bookings
        .create(urbanfix::marketplace::bookings::BookingCreate {
            user_id: customer.user.id.clone(),
            service_id: picked.service.id.clone(),
            price: picked.service.price,
            offer_discount: picked.service.offer_discount,
            schedule: Utc::now() + Duration::days(args.schedule_days),
            address: "12 MG Road, Kochi".to_string(),
            special_instructions: Some("Ring the bell twice".to_string()),
        })
        .await?;
    println!(
        "- Booking {} confirmed for {} (final amount {:.0})",
        booking.id,
        picked.service.title,
        final_amount(&booking)
    );

    let booking = services.bookings.start(&booking.id).await?;
    println!("- Booking {} -> {}", booking.id, booking.status.label());

    let booking = services
        .bookings
        .complete(
            &booking.id,
            CompletionContext {
                partner_id: partner_id.clone(),
                service_name: picked.service.title.clone(),
                customer_name: customer.user.user_name.clone(),
            },
        )
        .await?;
    println!("- Booking {} -> {}", booking.id, booking.status.label());

    println!("\nPartner earnings");
    let summary = services.ledger.summarize(&partner_id).await?;
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  Earnings summary unavailable: {err}"),
    }

    if args.skip_payout {
        return Ok(());
    }

    println!("\nPayout");
    let partner = services.profile.get(&partner_id).await?;
    let payout = services
        .ledger
        .request_payout(PayoutRequest {
            partner_id: partner_id.clone(),
            amount: summary.available_balance,
            bank_account: partner.bank_account,
        })
        .await;
    match payout {
        Ok(transaction) => println!(
            "- Payout {} of {:.0} requested",
            transaction.id, transaction.amount
        ),
        Err(err) => println!("- Payout rejected: {err}"),
    }

    let summary = services.ledger.summarize(&partner_id).await?;
    println!(
        "- Lifetime earnings {:.0} | available balance {:.0}",
        summary.total_earnings, summary.available_balance
    );

    Ok(())
}
