//! Choregraphy tests: script syntax, compilation, validation, set algebra
//! and wire serialization.

use astag::ast::{ColorSpec, Statement};
use astag::symbols::{EarDirection, EarPosition, EarTarget, LedColor, LedPosition, LedTarget};
use astag::{BadChorDesc, Choregraphy, Command, EarCommand, Evaluator, LedCommand};

fn chor(source: &str) -> Choregraphy {
    Choregraphy::compile(source).expect("compile")
}

// ==================== Simple choregraphies ====================

#[test]
fn simple_led_script() {
    let c = chor("set top led red");
    assert_eq!(c.to_query().expect("query"), vec!["chor=10,0,led,4,255,0,0"]);
}

#[test]
fn simple_ear_script() {
    let c = chor("move right ear forward of degrees 10");
    assert_eq!(
        c.to_query().expect("query"),
        vec!["chor=10,0,motor,0,10,0,0"]
    );
}

#[test]
fn named_choregraphy_has_chortitle() {
    let c = chor("set top led red").named("foo");
    assert_eq!(
        c.to_query().expect("query"),
        vec!["chor=10,0,led,4,255,0,0".to_string(), "chortitle=foo".to_string()]
    );
}

#[test]
fn name_does_not_take_part_in_equality() {
    assert_eq!(chor("set top led red").named("foo"), chor("set top led red"));
}

#[test]
fn compiling_twice_gives_equal_choregraphies() {
    let src = "at time 1 do set all leds to cyan end; move both ears backward of degrees 90";
    assert_eq!(chor(src), chor(src));
}

#[test]
fn statement_source_equals_script_source() {
    let script = chor("move both ears forward of degrees 42");
    let statements = Choregraphy::compile(vec![Statement::move_(
        EarTarget::Both,
        EarDirection::Forward,
        42,
    )])
    .expect("compile");
    assert_eq!(script, statements);
}

#[test]
fn multiple_sources_equal_joined_script() {
    let parts = ["set all off", "move right ear forward of degrees 180"];
    let joined = parts.join("\n");
    assert_eq!(
        Choregraphy::compile_all(parts).expect("compile"),
        chor(&joined)
    );
}

#[test]
fn cursor_persists_across_sources() {
    let split = Choregraphy::compile_all(["at time 1", "set top led red"]).expect("compile");
    assert_eq!(split, chor("set top led red at time 1"));
}

// ==================== `at time` forms ====================

#[test]
fn at_time_forms_are_equivalent() {
    let bare = chor("at time 0\nset right led to green\nat time 1\nset left led to red");
    let block = chor("at time 0 do set right led to green end\nat time 1 do set left led to red end");
    let trailing = chor("set right led to green at time 0\nset left led to red at time 1");
    assert_eq!(bare, block);
    assert_eq!(block, trailing);
}

#[test]
fn bare_at_persists_for_following_statements() {
    let c = chor("at time 1\nset top led red\nset bottom led green");
    assert_eq!(
        c.lines(),
        ["10,led,0,0,255,0", "10,led,4,255,0,0"]
    );
}

#[test]
fn block_at_restores_cursor_afterwards() {
    let c = chor("at time 1 do set top led red end\nset bottom led green");
    assert_eq!(c.lines(), ["0,led,0,0,255,0", "10,led,4,255,0,0"]);
}

#[test]
fn trailing_at_is_scoped_to_its_statement() {
    let c = chor("set top led red at time 1\nset bottom led green");
    assert_eq!(c.lines(), ["0,led,0,0,255,0", "10,led,4,255,0,0"]);
}

#[test]
fn time_is_quantized_to_ticks() {
    let c = chor("at time 1.2\nset top led red");
    assert_eq!(c.lines(), ["12,led,4,255,0,0"]);
    assert_eq!(astag::ticks(1.2), 12);
    assert_eq!(astag::ticks(0.0), 0);
}

#[test]
fn multiline_block_parses() {
    let src = "at time 0 do\n  set right led to green\n  set left led to red\nend";
    let c = chor(src);
    assert_eq!(c.lines(), ["0,led,1,255,0,0", "0,led,3,0,255,0"]);
}

// ==================== `move` and `set` phrasings ====================

#[test]
fn move_phrasings_are_equivalent() {
    let forms = [
        "move both ears forward degrees 130",
        "move both forward degrees 130",
        "move both forward of degrees 130",
        "move both ears forward of degrees 130",
        "move left ear forward of degrees 130\nmove right ear forward of degrees 130",
    ];
    let reference = chor(forms[forms.len() - 1]);
    for form in forms {
        assert_eq!(chor(form), reference, "form: {}", form);
    }
}

#[test]
fn set_phrasings_are_equivalent() {
    let forms = [
        "set left led green\nset right led green",
        "set left right led to green",
        "set right left rgb(0,255,0)",
        "set right left to 0,255,0",
    ];
    let reference = chor(forms[forms.len() - 1]);
    for form in forms {
        assert_eq!(chor(form), reference, "form: {}", form);
    }
}

#[test]
fn comments_are_ignored() {
    let c = chor("# warm up\nset top led red # top only");
    assert_eq!(c.lines(), ["0,led,4,255,0,0"]);
}

// ==================== Expansion and canonical form ====================

#[test]
fn all_expands_to_five_led_lines() {
    let c = chor("set all led red at time 0");
    assert_eq!(
        c.lines(),
        [
            "0,led,0,255,0,0",
            "0,led,1,255,0,0",
            "0,led,2,255,0,0",
            "0,led,3,255,0,0",
            "0,led,4,255,0,0",
        ]
    );
}

#[test]
fn all_absorbs_explicit_positions() {
    assert_eq!(chor("set all top led red"), chor("set all led red"));
}

#[test]
fn both_expands_to_two_motor_lines() {
    let c = chor("move both ears backward of degrees 90");
    assert_eq!(c.lines(), ["0,motor,0,90,0,1", "0,motor,1,90,0,1"]);
}

#[test]
fn statement_order_does_not_change_the_wire_form() {
    let a = chor("set top led red\nmove left ear forward of degrees 10");
    let b = chor("move left ear forward of degrees 10\nset top led red");
    assert_eq!(a.to_query().expect("query"), b.to_query().expect("query"));
}

#[test]
fn duplicate_statements_collapse() {
    assert_eq!(chor("set top led red\nset top led red"), chor("set top led red"));
}

// ==================== Set algebra ====================

#[test]
fn operators() {
    let one = chor("move left ear forward of degrees 42");
    let two = chor("move right ear forward of degrees 42");
    let onetwo = chor("move both ears forward of degrees 42");

    assert_eq!(&one | &two, &one + &two);
    assert_eq!(&one & &two, Choregraphy::new());
    assert_eq!(&one - &two, one);
    assert_eq!(&two - &one, two);
    assert_eq!(onetwo, &one + &two);
    assert_eq!(&onetwo & &two, two);
    assert_eq!(&onetwo & &one, one);
    assert_eq!(&onetwo - &two, one);
    assert_eq!(&onetwo - &one, two);
    assert_eq!(&onetwo | &two, onetwo);
    assert_eq!(&onetwo | &one, onetwo);
}

#[test]
fn algebra_identities() {
    let a = chor("set all leds to blue\nmove left ear forward of degrees 10");
    let b = chor("set top led to blue\nmove right ear backward of degrees 20");

    assert_eq!(a.union(&b), b.union(&a));
    assert_eq!(a.intersection(&b).union(&a.difference(&b)), a);
    assert_eq!(a.symmetric_difference(&a), Choregraphy::new());
    assert_eq!(a.union(&a), a);
    assert_eq!(&a ^ &b, (&a - &b).union(&(&b - &a)));
}

#[test]
fn both_ears_decomposes_into_left_and_right() {
    let both = chor("move both ears forward of degrees 42");
    let left = chor("move left ear forward of degrees 42");
    let right = chor("move right ear forward of degrees 42");
    assert_eq!(both, &left + &right);
}

#[test]
fn operator_results_are_unnamed() {
    let a = chor("set top led red").named("a");
    let b = chor("set bottom led red").named("b");
    let c = &a | &b;
    assert_eq!(c.name(), None);
    assert!(c.code().is_empty());
}

// ==================== Validation ====================

#[test]
fn angle_bounds() {
    assert!(Choregraphy::compile("move right ear forward of degrees 180").is_ok());
    assert_eq!(
        Choregraphy::compile("move right ear forward of degrees 181").unwrap_err(),
        BadChorDesc::AngleRange
    );
    assert_eq!(
        Choregraphy::compile("move right ear forward of degrees -1").unwrap_err(),
        BadChorDesc::AngleRange
    );
}

#[test]
fn color_channel_bounds() {
    assert!(Choregraphy::compile("set top led to rgb(255,0,0)").is_ok());
    assert!(Choregraphy::compile("set top led to rgb(0,0,0)").is_ok());
    assert_eq!(
        Choregraphy::compile("set top led to rgb(256,0,0)").unwrap_err(),
        BadChorDesc::ColorRange
    );
    assert_eq!(
        Choregraphy::compile("set top to 0,0,-1").unwrap_err(),
        BadChorDesc::ColorRange
    );
}

#[test]
fn negative_time_is_rejected() {
    assert_eq!(
        Choregraphy::compile("set top led red at time -1").unwrap_err(),
        BadChorDesc::NegativeTime
    );
}

#[test]
fn parse_errors_are_bad_descriptions() {
    assert!(matches!(
        Choregraphy::compile("set top led").unwrap_err(),
        BadChorDesc::Syntax(_)
    ));
    assert!(matches!(
        Choregraphy::compile("wibble the ears").unwrap_err(),
        BadChorDesc::Syntax(_)
    ));
}

#[test]
fn first_violation_wins_for_led_commands() {
    let mut eval = Evaluator::new();
    assert_eq!(eval.set(LedCommand::new()).unwrap_err(), BadChorDesc::NoElement);

    let mut eval = Evaluator::new();
    let no_time = LedCommand {
        elements: vec![LedTarget::Pos(LedPosition::Top)],
        color: None,
        time: None,
    };
    assert_eq!(eval.set(no_time).unwrap_err(), BadChorDesc::NoTime);

    let mut eval = Evaluator::new();
    let no_color = LedCommand {
        elements: vec![LedTarget::Pos(LedPosition::Top)],
        color: None,
        time: Some(0),
    };
    assert_eq!(eval.set(no_color).unwrap_err(), BadChorDesc::NoColor);

    let mut eval = Evaluator::new();
    let short_color = LedCommand {
        elements: vec![LedTarget::Pos(LedPosition::Top)],
        color: Some(vec![255, 0]),
        time: Some(0),
    };
    assert_eq!(eval.set(short_color).unwrap_err(), BadChorDesc::BadColorSize);
}

#[test]
fn first_violation_wins_for_ear_commands() {
    let mut eval = Evaluator::new();
    assert_eq!(eval.move_(EarCommand::new()).unwrap_err(), BadChorDesc::NoTime);

    let mut eval = Evaluator::new();
    let no_angle = EarCommand {
        time: Some(0),
        ..EarCommand::new()
    };
    assert_eq!(eval.move_(no_angle).unwrap_err(), BadChorDesc::NoAngle);

    let mut eval = Evaluator::new();
    let no_direction = EarCommand {
        time: Some(0),
        angle: Some(90),
        ..EarCommand::new()
    };
    assert_eq!(eval.move_(no_direction).unwrap_err(), BadChorDesc::NoDirection);

    let mut eval = Evaluator::new();
    let no_element = EarCommand {
        time: Some(0),
        angle: Some(90),
        direction: Some(EarDirection::Forward),
        ..EarCommand::new()
    };
    assert_eq!(eval.move_(no_element).unwrap_err(), BadChorDesc::NoElement);
}

#[test]
fn set_rejects_ear_commands_and_move_rejects_led_commands() {
    let mut eval = Evaluator::new();
    assert_eq!(
        eval.set(EarCommand::new()).unwrap_err(),
        BadChorDesc::WrongCommand
    );
    assert_eq!(
        eval.move_(LedCommand::new()).unwrap_err(),
        BadChorDesc::WrongCommand
    );
}

#[test]
fn earlier_lines_survive_a_later_failure() {
    let mut eval = Evaluator::new();
    eval.set(LedCommand::rgb([255, 0, 0], 0).element(LedTarget::Pos(LedPosition::Top)))
        .expect("set");
    assert!(eval.move_(EarCommand::degrees(200, 0)).is_err());
    let chor = Choregraphy::from(eval);
    assert_eq!(chor.lines(), ["0,led,4,255,0,0"]);
}

// ==================== Empty choregraphies ====================

#[test]
fn empty_script_compiles_but_does_not_serialize() {
    let empty = chor("");
    assert!(empty.is_empty());
    assert_eq!(empty, Choregraphy::new());
    assert_eq!(empty.to_query().unwrap_err(), BadChorDesc::Empty);
}

#[test]
fn blank_script_is_empty() {
    assert_eq!(chor("  \n ; \n"), Choregraphy::new());
}

// ==================== Low-level command structs ====================

#[test]
fn low_level_ear_command() {
    let expected = chor("at time 0 do move left ear forward of degrees 120 end");

    let command = EarCommand {
        element: Some(EarTarget::Pos(EarPosition::Left)),
        direction: Some(EarDirection::Forward),
        angle: Some(120),
        time: Some(0),
    };
    let mut eval = Evaluator::new();
    eval.move_(command).expect("move");
    assert_eq!(Choregraphy::from(eval), expected);
}

#[test]
fn low_level_led_command() {
    let expected = chor("at time 2 do set right top red end");

    let command = LedCommand {
        elements: vec![
            LedTarget::Pos(LedPosition::Right),
            LedTarget::Pos(LedPosition::Top),
        ],
        color: Some(LedColor::Red.channels().iter().map(|&c| c as i64).collect()),
        time: Some(20),
    };
    let mut eval = Evaluator::new();
    eval.set(command).expect("set");
    assert_eq!(Choregraphy::from(eval), expected);
}

#[test]
fn left_and_right_dispatch_on_the_command_kind() {
    let led = Command::from(LedCommand::rgb([0, 255, 0], 0)).left().led();
    assert_eq!(
        led.into_led().expect("led").elements,
        vec![LedTarget::Pos(LedPosition::Left)]
    );

    let ear = Command::from(EarCommand::degrees(90, 0)).forward().right().ear();
    let ear = ear.into_ear().expect("ear");
    assert_eq!(ear.element, Some(EarTarget::Pos(EarPosition::Right)));
    assert_eq!(ear.direction, Some(EarDirection::Forward));
}

#[test]
fn builder_words_match_the_script() {
    let mut eval = Evaluator::new();
    eval.at(1.0);
    let tick = eval.tick();
    let green = ColorSpec::Named(LedColor::Green).channels();
    eval.set(Command::from(LedCommand::rgb(green, tick)).all().leds())
        .expect("set");
    assert_eq!(Choregraphy::from(eval), chor("set all leds to green at time 1"));
}

// ==================== End to end ====================

#[test]
fn end_to_end_wire_fragment() {
    let c = chor("at time 0 do set top led red end");
    assert_eq!(c.to_query().expect("query").join("&"), "chor=10,0,led,4,255,0,0");
}
