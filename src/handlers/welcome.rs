// ─── GET / ───────────────────────────────────────────────────────
/// Static greeting. No rate limit, no state mutation.

pub async fn welcome() -> &'static str {
    "Welcome to adpulse 😎"
}
