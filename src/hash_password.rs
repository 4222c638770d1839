// hash_password.rs
// Utility to hash a password for seeding a credentials account in the Directory

#[path = "auth/password.rs"]
#[allow(dead_code)]
mod password;

fn main() -> anyhow::Result<()> {
    let secret = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: hash_password <password>"))?;

    let phc = password::hash_password(&secret)?;

    println!("✅ Hash generated successfully!\n");
    println!("Store this PHC string as the account's password in the Directory:");
    println!("─────────────────────────────────────────────────");
    println!("{}", phc);
    println!("─────────────────────────────────────────────────");
    println!("\n⚠️  IMPORTANT:");
    println!("  • The plaintext is not recoverable from this hash");
    println!("  • Never log or commit the plaintext password");

    Ok(())
}
