//! End-to-end scenarios: compile a program, execute the emitted assembly on
//! the instruction-subset interpreter, and check the exit status.

mod common;

use common::compile_and_run;

#[test]
fn literal_value() {
    assert_eq!(compile_and_run("42;"), 42);
}

#[test]
fn addition_and_subtraction() {
    assert_eq!(compile_and_run("5 + 20 - 4;"), 21);
}

#[test]
fn parenthesized_multiplication() {
    assert_eq!(compile_and_run("2 * (3 + 4);"), 14);
}

#[test]
fn variables_multiply() {
    assert_eq!(compile_and_run("a = 3; b = 4; a * b;"), 12);
}

#[test]
fn while_loop_counts_to_five() {
    assert_eq!(compile_and_run("i = 0; while (i < 5) i = i + 1; i;"), 5);
}

#[test]
fn if_else_picks_the_then_branch() {
    assert_eq!(
        compile_and_run("x = 10; if (x == 10) x = 1; else x = 2; x;"),
        1
    );
}

#[test]
fn for_loop_sums_one_to_three() {
    assert_eq!(
        compile_and_run("s = 0; for (i = 1; i <= 3; i = i + 1) s = s + i; s;"),
        6
    );
}

#[test]
fn division_and_modulo() {
    assert_eq!(compile_and_run("7 / 2;"), 3);
    assert_eq!(compile_and_run("10 % 3;"), 1);
}

#[test]
fn modulo_keeps_the_full_remainder_width() {
    // 1000 % 600 = 400; a remainder masked to 8 bits would give 144 here
    // and 1 after the division.
    assert_eq!(compile_and_run("(1000 % 600) / 100;"), 4);
}

#[test]
fn numeric_bases_agree() {
    assert_eq!(compile_and_run("0x2a;"), 42);
    assert_eq!(compile_and_run("052;"), 42);
    assert_eq!(compile_and_run("0b101010;"), 42);
}

#[test]
fn comparisons_yield_zero_or_one() {
    assert_eq!(compile_and_run("3 < 5;"), 1);
    assert_eq!(compile_and_run("3 > 5;"), 0);
    assert_eq!(compile_and_run("5 <= 5;"), 1);
    assert_eq!(compile_and_run("4 >= 5;"), 0);
    assert_eq!(compile_and_run("4 != 5;"), 1);
    assert_eq!(compile_and_run("4 == 4;"), 1);
}

#[test]
fn unary_operators() {
    assert_eq!(compile_and_run("-(3 - 7);"), 4);
    assert_eq!(compile_and_run("+5;"), 5);
    assert_eq!(compile_and_run("!0;"), 1);
    assert_eq!(compile_and_run("!7;"), 0);
    assert_eq!(compile_and_run("~0 + 2;"), 1);
}

#[test]
fn increment_and_decrement_forms() {
    assert_eq!(compile_and_run("x = 5; ++x;"), 6);
    assert_eq!(compile_and_run("x = 5; x++; x;"), 6);
    // Postfix yields the old value.
    assert_eq!(compile_and_run("x = 5; x++;"), 5);
    assert_eq!(compile_and_run("x = 5; --x; x;"), 4);
    assert_eq!(compile_and_run("x = 5; x--;"), 5);
}

#[test]
fn assignment_chains_and_produces_a_value() {
    assert_eq!(compile_and_run("x = y = 7; x + y;"), 14);
    assert_eq!(compile_and_run("x = 3;"), 3);
}

#[test]
fn ternary_conditional() {
    assert_eq!(compile_and_run("1 ? 10 : 20;"), 10);
    assert_eq!(compile_and_run("0 ? 10 : 20;"), 20);
    assert_eq!(compile_and_run("x = 3; x > 2 ? x * 2 : x;"), 6);
}

#[test]
fn do_while_runs_at_least_once() {
    assert_eq!(compile_and_run("x = 10; do x = x + 1; while (0); x;"), 11);
    assert_eq!(
        compile_and_run("i = 0; do i = i + 1; while (i < 4); i;"),
        4
    );
}

#[test]
fn nested_scopes_reach_outer_variables() {
    assert_eq!(compile_and_run("a = 1; { a = a + 2; { a = a * 3; } } a;"), 9);
}

#[test]
fn sibling_scopes_do_not_share_locals() {
    assert_eq!(compile_and_run("a = 1; { b = 10; a = a + b; } { c = 100; a = a + c; } a;"), 111);
}

#[test]
fn break_leaves_the_loop() {
    assert_eq!(
        compile_and_run(
            "s = 0; i = 0; while (1) { i = i + 1; if (i > 4) break; s = s + i; } s;"
        ),
        10
    );
}

#[test]
fn continue_skips_to_the_condition() {
    assert_eq!(
        compile_and_run(
            "s = 0; i = 0; while (i < 5) { i = i + 1; if (i == 3) continue; s = s + i; } s;"
        ),
        12
    );
}

#[test]
fn break_unwinds_nested_blocks() {
    assert_eq!(
        compile_and_run("x = 0; while (1) { { x = 7; break; } } x;"),
        7
    );
}

#[test]
fn for_loop_with_empty_condition_breaks_out() {
    assert_eq!(
        compile_and_run("i = 0; for (;;) { i = i + 1; if (i == 3) break; } i;"),
        3
    );
}

#[test]
fn loops_inside_loops_target_their_own_labels() {
    assert_eq!(
        compile_and_run(
            "s = 0; \
             for (i = 0; i < 3; i = i + 1) { \
                 j = 0; \
                 while (j < 2) { j = j + 1; s = s + 1; } \
             } \
             s;"
        ),
        6
    );
}

#[test]
fn comments_do_not_change_the_program() {
    assert_eq!(
        compile_and_run("a = 2; // line comment\n/* block\ncomment */ a * 21;"),
        42
    );
}

#[test]
fn exit_status_is_truncated_to_a_byte() {
    assert_eq!(compile_and_run("256 + 42;"), 42);
}
