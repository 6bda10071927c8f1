use greeter_auth::{ClaimType, Principal};

/// `Hello #<id>`, where `<id>` is the caller's first unique-identifier claim.
///
/// A principal without that claim still gets a greeting, with an empty id.
pub fn greeting(principal: &Principal) -> String {
    let id = principal
        .find_first_value(&ClaimType::NameIdentifier)
        .unwrap_or_else(|| {
            tracing::warn!(
                scheme = principal.identity().scheme(),
                "Principal has no unique-identifier claim"
            );
            ""
        });

    format!("Hello #{id}")
}

/// `GET /hi`
pub async fn hi(principal: Principal) -> String {
    greeting(&principal)
}
