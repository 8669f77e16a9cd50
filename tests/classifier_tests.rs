use yuv::kernel::intent::{classify, sanitize_expression, Intent, IntentKind};

#[test]
fn test_greeting_any_case_and_punctuation() {
    for input in ["hello", "Hello there!", "HEY", "...hi...", "Greetings, friend", "  hI  "] {
        assert_eq!(classify(input), Intent::Greeting, "'{}' should be a greeting", input);
    }
}

#[test]
fn test_greeting_wins_over_later_rules() {
    // Contains both a greeting and a todo trigger; priority decides.
    assert_eq!(classify("hey, add to my todo: stuff"), Intent::Greeting);
    assert_eq!(classify("hello 2+2"), Intent::Greeting);
}

#[test]
fn test_thanks() {
    for input in ["thanks", "Thank you so much", "I really APPRECIATE it"] {
        assert_eq!(classify(input), Intent::Thanks, "'{}' should be thanks", input);
    }
}

#[test]
fn test_arithmetic_payload_is_sanitized() {
    assert_eq!(
        classify("5 + 3 * 2"),
        Intent::Arithmetic { expression: "5+3*2".to_string() }
    );
    assert_eq!(
        classify("what is sqrt(16)"),
        Intent::Arithmetic { expression: "sqrt(16)".to_string() }
    );
    assert_eq!(
        classify("2 ** 10"),
        Intent::Arithmetic { expression: "2^10".to_string() }
    );
}

#[test]
fn test_division_by_zero_still_classifies_as_arithmetic() {
    // Parses fine; evaluation failure is the dispatcher's concern.
    assert_eq!(classify("1/0").kind(), IntentKind::Arithmetic);
}

#[test]
fn test_math_like_text_falls_through() {
    assert_eq!(
        classify("well-known facts"),
        Intent::WebQuery { query: "well-known facts".to_string() }
    );
    // A bare number is not an operation.
    assert_eq!(
        classify("The year 1999"),
        Intent::WebQuery { query: "The year 1999".to_string() }
    );
}

#[test]
fn test_todo_add() {
    assert_eq!(
        classify("add to my todo: buy milk"),
        Intent::TodoAdd { task: "buy milk".to_string() }
    );
    assert_eq!(
        classify("Add To My Todo List:   walk dog  "),
        Intent::TodoAdd { task: "walk dog".to_string() }
    );
}

#[test]
fn test_notes_add() {
    assert_eq!(
        classify("add to my notes: rust is fun"),
        Intent::NotesAdd { note: "rust is fun".to_string() }
    );
}

#[test]
fn test_reminder_with_time() {
    // "5pm" sanitizes to a bare number and must not steal the reminder.
    let intent = classify("remind me to call mom at 5pm");
    assert_eq!(intent, Intent::Reminder { reminder: "call mom at 5pm".to_string() });
    assert_eq!(intent.payload(), Some("call mom at 5pm"));
}

#[test]
fn test_triggers_must_be_at_start() {
    assert_eq!(classify("please remind me to stretch").kind(), IntentKind::WebQuery);
}

#[test]
fn test_web_query_carries_trimmed_input() {
    assert_eq!(
        classify("   capital of france  "),
        Intent::WebQuery { query: "capital of france".to_string() }
    );
    assert_eq!(classify("what is rust").payload(), Some("what is rust"));
}

#[test]
fn test_sanitize_keeps_whole_function_words_only() {
    assert_eq!(sanitize_expression("the distance is 5"), "5");
    assert_eq!(sanitize_expression("cos(0) plus 1"), "cos(0)1");
    assert_eq!(sanitize_expression("Sqrt(4) ** 2"), "sqrt(4)^2");
    assert_eq!(sanitize_expression("sqrt (9)"), "sqrt(9)");
}

#[test]
fn test_function_word_without_call_is_dropped() {
    assert_eq!(sanitize_expression("what is the tan of 5-3"), "5-3");
    assert_eq!(
        classify("what is the tan of 5-3"),
        Intent::Arithmetic { expression: "5-3".to_string() }
    );
}

#[test]
fn test_deeply_nested_input_becomes_web_query() {
    let text = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
    assert_eq!(classify(&text).kind(), IntentKind::WebQuery);

    let signs = format!("{}1+1", "-".repeat(50_000));
    assert_eq!(classify(&signs).kind(), IntentKind::WebQuery);
}
