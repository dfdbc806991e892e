use time::OffsetDateTime;

/// Mint the placeholder session token: `simple_token_<id>_<unix_millis>`.
///
/// This is not a credential. It carries no signature and no expiry, and
/// nothing in this service ever verifies it. A real deployment must swap
/// this for a signed, expiring token before going anywhere near production.
pub fn mint_session_token(user_id: i64) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("simple_token_{user_id}_{millis}")
}
