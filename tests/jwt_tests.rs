use solartn_backend::config::JwtConfig;
use solartn_backend::util::jwt::{JwtError, JwtTokenUtils, JwtTokenUtilsImpl};

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

#[test]
fn test_token_generation_and_validation() {
    let utils = create_test_jwt_utils();
    let token = utils
        .generate_token("65f000000000000000000001", "admin", "admin@solartn.com", "super_admin")
        .expect("Failed to generate token");

    let claims = utils.validate_token(&token).expect("Failed to validate token");
    assert_eq!(claims.sub, "65f000000000000000000001");
    assert_eq!(claims.username, "admin");
    assert_eq!(claims.email, "admin@solartn.com");
    assert_eq!(claims.role, "super_admin");
}

#[test]
fn test_each_token_has_a_unique_jti() {
    let utils = create_test_jwt_utils();
    let a = utils
        .generate_token("id", "admin", "a@b.com", "admin")
        .unwrap();
    let b = utils
        .generate_token("id", "admin", "a@b.com", "admin")
        .unwrap();

    let claims_a = utils.validate_token(&a).unwrap();
    let claims_b = utils.validate_token(&b).unwrap();
    assert_ne!(claims_a.jti, claims_b.jti);
}

#[test]
fn test_tampered_token_is_rejected() {
    let utils = create_test_jwt_utils();
    let token = utils
        .generate_token("id", "admin", "a@b.com", "admin")
        .unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('a') { 'b' } else { 'a' });

    assert!(matches!(
        utils.validate_token(&tampered),
        Err(JwtError::DecodingFailed(_))
    ));
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let utils = create_test_jwt_utils();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "another_secret_key_that_is_long_enough_for_hs256".to_string(),
        token_expiration_minutes: 60,
    });

    let token = other
        .generate_token("id", "admin", "a@b.com", "admin")
        .unwrap();
    assert!(utils.validate_token(&token).is_err());
}

#[test]
fn test_extract_token_from_header() {
    let utils = create_test_jwt_utils();

    assert_eq!(
        utils
            .extract_token_from_header("Bearer abc.def.ghi")
            .unwrap(),
        "abc.def.ghi"
    );
    assert!(matches!(
        utils.extract_token_from_header("Basic abc"),
        Err(JwtError::InvalidToken)
    ));
    assert!(matches!(
        utils.extract_token_from_header("Bearer "),
        Err(JwtError::InvalidToken)
    ));
}
