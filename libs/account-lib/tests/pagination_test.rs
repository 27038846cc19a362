use account_lib::pagination::{
    Direction, PaginationParams, Sort, SortError, SortField, UserSortField, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};

fn parse(params: &[&str]) -> Result<Sort<UserSortField>, SortError> {
    Sort::parse(params.iter().copied())
}

// ==================== SORT PARSING ====================

#[test]
fn test_parse_single_field_with_direction() {
    let sort = parse(&["id,desc"]).unwrap();
    assert_eq!(sort, Sort::by(UserSortField::Id, Direction::Desc));
}

#[test]
fn test_parse_defaults_to_ascending() {
    let sort = parse(&["login"]).unwrap();
    assert_eq!(sort, Sort::by(UserSortField::Login, Direction::Asc));
}

#[test]
fn test_parse_direction_is_case_insensitive() {
    let sort = parse(&["email,DESC"]).unwrap();
    assert_eq!(sort, Sort::by(UserSortField::Email, Direction::Desc));
}

#[test]
fn test_parse_several_properties_share_direction() {
    let sort = parse(&["firstName,lastName,desc"]).unwrap();
    assert_eq!(
        sort,
        Sort::by(UserSortField::FirstName, Direction::Desc).and(UserSortField::LastName, Direction::Desc)
    );
}

#[test]
fn test_parse_repeated_params_keep_request_order() {
    let sort = parse(&["langKey,asc", "id,desc"]).unwrap();
    assert_eq!(
        sort,
        Sort::by(UserSortField::LangKey, Direction::Asc).and(UserSortField::Id, Direction::Desc)
    );
}

#[test]
fn test_parse_rejects_reset_key() {
    assert_eq!(
        parse(&["resetKey,desc"]),
        Err(SortError::DisallowedProperty("resetKey".to_string()))
    );
}

#[test]
fn test_parse_rejects_password() {
    assert_eq!(
        parse(&["password,desc"]),
        Err(SortError::DisallowedProperty("password".to_string()))
    );
}

#[test]
fn test_parse_rejects_disallowed_field_mixed_with_allowed() {
    assert!(parse(&["resetKey,desc", "id,desc"]).is_err());
    assert!(parse(&["id,desc", "password"]).is_err());
    assert!(parse(&["login,password_hash,asc"]).is_err());
}

#[test]
fn test_parse_rejects_column_names() {
    // Only public property names are accepted, not database columns.
    assert!(parse(&["first_name"]).is_err());
    assert!(parse(&["activation_key"]).is_err());
}

#[test]
fn test_parse_unknown_direction_is_treated_as_property() {
    assert_eq!(
        parse(&["id,sideways"]),
        Err(SortError::DisallowedProperty("sideways".to_string()))
    );
}

#[test]
fn test_parse_blank_and_direction_only_values_add_nothing() {
    let sort = parse(&["", ",", "desc", " , asc"]).unwrap();
    assert!(sort.is_unsorted());
}

#[test]
fn test_every_allowed_property_round_trips() {
    for field in UserSortField::ALL {
        assert_eq!(UserSortField::from_property(field.property()), Some(field));
    }
}

// ==================== ORDER BY ====================

#[test]
fn test_order_by_appends_id_tie_breaker() {
    let sort = Sort::by(UserSortField::Login, Direction::Desc);
    assert_eq!(sort.to_order_by(UserSortField::Id), "login DESC, id ASC");
}

#[test]
fn test_order_by_keeps_explicit_id() {
    let sort = Sort::by(UserSortField::Id, Direction::Desc);
    assert_eq!(sort.to_order_by(UserSortField::Id), "id DESC");
}

#[test]
fn test_order_by_unsorted() {
    let sort: Sort<UserSortField> = Sort::unsorted();
    assert_eq!(sort.to_order_by(UserSortField::Id), "id ASC");
}

#[test]
fn test_order_by_maps_to_columns() {
    let sort = Sort::by(UserSortField::FirstName, Direction::Asc).and(UserSortField::LangKey, Direction::Desc);
    assert_eq!(
        sort.to_order_by(UserSortField::Id),
        "first_name ASC, lang_key DESC, id ASC"
    );
}

// ==================== PAGINATION PARAMS ====================

#[test]
fn test_pagination_defaults() {
    let params: PaginationParams = PaginationParams::default();
    assert_eq!(params.page, 0);
    assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(params.offset(), 0);
}

#[test]
fn test_pagination_zero_size_falls_back_to_default() {
    let params = PaginationParams::new(Some(3), Some(0), Sort::<UserSortField>::unsorted());
    assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(params.offset(), 60);
}

#[test]
fn test_pagination_clamps_size() {
    let params = PaginationParams::new(None, Some(50_000), Sort::<UserSortField>::unsorted());
    assert_eq!(params.page_size, MAX_PAGE_SIZE);
}
