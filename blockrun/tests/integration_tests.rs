#[macro_use]
mod common;

use common::TestResult;

check_program!(
    test_return_constant,
    input = "return_constant.json",
    result = TestResult::output(42)
);

check_program!(
    test_sequential_assignment,
    input = "sequential_assignment.json",
    result = TestResult::output(2)
);

check_program!(
    test_factorial,
    input = "factorial.json",
    vars = [("n", 5)],
    result = TestResult::output(120)
);

check_program!(
    test_factorial_of_zero,
    input = "factorial.json",
    vars = [("n", 0)],
    result = TestResult::output(1)
);

check_program!(
    test_factorial_exceeds_64_bits,
    input = "factorial.json",
    vars = [("n", 30)],
    result = TestResult::output("265252859812191058636308480000000")
);

check_program!(
    test_gcd,
    input = "gcd.json",
    vars = [("a", 48), ("b", 18)],
    result = TestResult::output(6)
);

// Only a condition of exactly 1 takes the true branch.
check_program!(
    test_branch_one_is_true,
    input = "branch.json",
    vars = [("c", 1)],
    result = TestResult::output(1)
);

check_program!(
    test_branch_zero_is_false,
    input = "branch.json",
    vars = [("c", 0)],
    result = TestResult::output(0)
);

check_program!(
    test_branch_negative_is_false,
    input = "branch.json",
    vars = [("c", -3)],
    result = TestResult::output(0)
);

check_program!(
    test_branch_five_is_false,
    input = "branch.json",
    vars = [("c", 5)],
    result = TestResult::output(0)
);

check_program!(
    test_division_truncates_down,
    input = "division.json",
    vars = [("a", 7), ("b", 2)],
    result = TestResult::output(3)
);

check_program!(
    test_negative_division_floors,
    input = "division.json",
    vars = [("a", -7), ("b", 2)],
    result = TestResult::output(-4)
);

check_program!(
    test_modulo_follows_floor_division,
    input = "modulo.json",
    vars = [("a", -7), ("b", 2)],
    result = TestResult::output(1)
);

check_program!(
    test_division_by_zero,
    input = "division_by_zero.json",
    vars = [("a", 4)],
    result = TestResult::error_regex(r"division by zero in `10 / 0`")
);

check_program!(
    test_modulo_by_zero,
    input = "modulo.json",
    vars = [("a", 4), ("b", 0)],
    result = TestResult::error_regex(r"division by zero in `4 % 0`")
);

check_program!(
    test_bitwise_positive,
    input = "bitwise.json",
    vars = [("x", 5)],
    result = TestResult::output(-1)
);

check_program!(
    test_bitwise_negative,
    input = "bitwise.json",
    vars = [("x", -6)],
    result = TestResult::output(12)
);

check_program!(
    test_power,
    input = "power.json",
    vars = [("b", 2), ("e", 100)],
    result = TestResult::output("1267650600228229401496703205376")
);

check_program!(
    test_negative_exponent,
    input = "power.json",
    vars = [("b", 2), ("e", -2)],
    result = TestResult::error_regex(r"invalid exponent in `2 \*\* -2`")
);

check_program!(
    test_comparisons_equal,
    input = "comparisons.json",
    vars = [("a", 3), ("b", 3)],
    result = TestResult::output(-1000)
);

check_program!(
    test_comparisons_greater,
    input = "comparisons.json",
    vars = [("a", 5), ("b", 2)],
    result = TestResult::output(-110)
);

check_program!(
    test_comparisons_less,
    input = "comparisons.json",
    vars = [("a", 1), ("b", 4)],
    result = TestResult::output(-101)
);

check_program!(
    test_duplicate_labels_first_wins,
    input = "duplicate_labels.json",
    result = TestResult::output(1)
);

check_program!(
    test_stale_blocks_never_run,
    input = "stale_blocks.json",
    result = TestResult::output(7)
);

check_program!(
    test_unresolved_goto,
    input = "unresolved_label.json",
    result = TestResult::error_regex(r"no basic block is labelled `missing`")
);

check_program!(
    test_unresolved_if_branch,
    input = "unresolved_branch.json",
    vars = [("c", 0)],
    result = TestResult::error_regex(r"no basic block is labelled `nowhere`")
);

check_program!(
    test_resolved_if_branch,
    input = "unresolved_branch.json",
    vars = [("c", 1)],
    result = TestResult::output(1)
);

check_program!(
    test_cycle_hits_step_limit,
    input = "infinite_loop.json",
    result = TestResult::error_regex(r"step limit of 10000 basic blocks exceeded")
);

check_program!(
    test_undefined_variable,
    input = "undefined_variable.json",
    result = TestResult::error_regex(r"variable `y` is not defined")
);

check_program!(
    test_missing_input,
    input = "factorial.json",
    result = TestResult::error_regex(r"cannot read input `n`: no value provided")
);

check_program!(
    test_three_operands,
    input = "three_operands.json",
    result = TestResult::error_regex(r"(?s)Malformed program.*expression has 3 operands")
);

check_program!(
    test_unknown_operator,
    input = "unknown_operator.json",
    result = TestResult::error_regex(r"unknown binary operator `//`")
);

check_program!(
    test_block_without_jump,
    input = "missing_jump.json",
    result = TestResult::error_regex(r"shape mismatch in basic block: expected Jump, found Assignment node")
);

check_program!(
    test_missing_file,
    input = "does_not_exist.json",
    result = TestResult::error_regex(r"Failed to read program tree")
);
