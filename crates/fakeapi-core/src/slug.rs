/// Derive the endpoint identifier from a schema display name.
///
/// The name is lower-cased, every run of characters outside `[a-z0-9]` becomes
/// a single `-`, and leading/trailing hyphens are dropped.
pub fn endpoint_id_from_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(endpoint_id_from_name("  My Users API!! "), "my-users-api");
        assert_eq!(endpoint_id_from_name("orders__v2"), "orders-v2");
        assert_eq!(endpoint_id_from_name("---"), "");
    }

    #[test]
    fn non_ascii_letters_act_as_separators() {
        assert_eq!(endpoint_id_from_name("Cadastro de Usuários"), "cadastro-de-usu-rios");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(endpoint_id_from_name("Top 10 Products"), "top-10-products");
    }
}
