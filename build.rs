// Rebuild when a migration changes so `sqlx::migrate!` picks it up.
fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
