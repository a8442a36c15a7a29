//! Basic banking example

use banking_core::utils::MemoryStorage;
use banking_core::{AccountCategory, BankingSystem};
use bigdecimal::BigDecimal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Banking Core - Basic Example\n");

    let mut bank = BankingSystem::load(MemoryStorage::new()).await?;

    // 1. Open two accounts
    println!("📂 Opening accounts...");
    let alice = bank.create_account(AccountCategory::Personal).await?;
    let shop = bank.create_account(AccountCategory::Business).await?;
    for account in [&alice, &shop] {
        println!(
            "  ✓ {} account {} (passcode {})",
            account.category, account.id, account.passcode
        );
    }
    println!();

    // 2. Log in and move some money around
    println!("💰 Recording transactions...\n");
    bank.login(&alice.id, &alice.passcode)?;

    let outcomes = [
        bank.deposit(&alice.id, &BigDecimal::from(100)).await?,
        bank.withdraw(&alice.id, &BigDecimal::from(30)).await?,
        bank.transfer(&alice.id, &shop.id, &BigDecimal::from(20)).await?,
        bank.withdraw(&alice.id, &BigDecimal::from(500)).await?,
    ];
    for outcome in outcomes {
        match outcome {
            Ok(completed) => println!("  ✓ {}", completed),
            Err(rejected) => println!("  ✗ {}", rejected),
        }
    }
    println!();

    // 3. Final balances
    println!("📊 Balances:");
    for account in [&alice, &shop] {
        if let Some(current) = bank.account(&account.id) {
            println!("  {} {}: {}", current.category, current.id, current.balance);
        }
    }

    // 4. Close the business account
    bank.delete_account(&shop.id).await?;
    if let Err(err) = bank.login(&shop.id, &shop.passcode) {
        println!("\n🗑  Closed {}: {}", shop.id, err);
    }

    Ok(())
}
