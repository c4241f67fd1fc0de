use super::Suggestion;

#[test]
fn it_offers_the_default_cards() {
    let suggestions = Suggestion::defaults();

    assert_eq!(
        suggestions,
        vec![
            Suggestion::new("Creative ways", "to teach coding to kids"),
            Suggestion::new("Generate UI", "for a finance tracking app"),
        ]
    );
}

#[test]
fn it_joins_title_and_subtitle_into_a_prompt() {
    let suggestion = Suggestion::new("Generate UI", "for a finance tracking app");

    insta::assert_snapshot!(suggestion.prompt(), @"Generate UI for a finance tracking app");
}
