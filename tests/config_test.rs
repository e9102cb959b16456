use tableau_ngin::{config::TableauConfig, error::ConfigError};

#[test]
fn should_default_to_the_page_look() {
    let config = TableauConfig::default();
    assert_eq!(config.seed, None);
    assert_eq!(config.board.field.grid_size, 20);
    assert_eq!(config.board.container, "canvas-container");
    assert_eq!(config.piece.container, "chess-piece-container");
    assert_eq!(config.piece.halo.count, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn should_fill_gaps_from_defaults() {
    let config =
        TableauConfig::from_json(r#"{"seed": 7, "board": {"field": {"grid_size": 3}}}"#).unwrap();
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.board.field.grid_size, 3);
    assert_eq!(config.board.field.spacing, 4.0);
    assert_eq!(config.board.bob_amplitude, 5.0);
    assert_eq!(config.piece, TableauConfig::default().piece);
}

#[test]
fn should_accept_an_empty_object() {
    assert_eq!(TableauConfig::from_json("{}").unwrap(), TableauConfig::default());
}

#[test]
fn should_reject_malformed_json() {
    let err = TableauConfig::from_json("{\"seed\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn should_reject_probabilities_out_of_range() {
    let err =
        TableauConfig::from_json(r#"{"board": {"field": {"skip_probability": 1.5}}}"#).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "board.field.skip_probability"),
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn should_reject_empty_ranges() {
    let err =
        TableauConfig::from_json(r#"{"board": {"field": {"speed_range": [0.003, 0.001]}}}"#)
            .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "board.field.speed_range",
            ..
        }
    ));

    let err = TableauConfig::from_json(r#"{"piece": {"halo": {"vertical_offset_range": [1, 1]}}}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "piece.halo.vertical_offset_range",
            ..
        }
    ));
}

#[test]
fn should_reject_non_positive_spacing() {
    let mut config = TableauConfig::default();
    config.board.field.spacing = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn should_allow_disabling_fog() {
    let config = TableauConfig::from_json(r#"{"board": {"fog": null}}"#).unwrap();
    assert!(config.board.fog.is_none());
}
