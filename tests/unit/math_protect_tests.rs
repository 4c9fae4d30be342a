/*!
 * Tests for LaTeX math span protection
 */

use dualdoc::math_protect::{protect_math, restore_math};

/// Test protecting and restoring inline math
#[test]
fn test_protect_math_withInlineSpans_shouldRoundTrip() {
    let text = "Let $x$ and $y = f(x)$ be variables.";
    let (protected, table) = protect_math(text);

    assert_eq!(table.len(), 2);
    assert!(!protected.contains('$'));
    assert!(protected.contains("MATHINLINE0000"));
    assert!(protected.contains("MATHINLINE0001"));

    let restored = restore_math(&protected, &table);
    assert_eq!(restored, text);
}

/// Test protecting block math that spans lines
#[test]
fn test_protect_math_withMultilineBlock_shouldRoundTrip() {
    let text = "Derivation:\n$$\n\\sum_{i=1}^{n} x_i^2\n$$\nas shown.";
    let (protected, table) = protect_math(text);

    assert_eq!(table.len(), 1);
    assert!(protected.contains("MATHBLOCK0000"));
    assert!(!protected.contains("\\sum"));

    let restored = restore_math(&protected, &table);
    assert_eq!(restored, text);
}

/// Test that block spans are claimed before inline spans
#[test]
fn test_protect_math_withBlockAndInline_shouldClaimBlockFirst() {
    let text = "$$a + b$$ then $c$";
    let (protected, table) = protect_math(text);

    assert_eq!(table.len(), 2);
    // Shared counter: block tokens are assigned first
    assert!(protected.starts_with("MATHBLOCK0000"));
    assert!(protected.ends_with("MATHINLINE0001"));
    assert_eq!(restore_math(&protected, &table), text);
}

/// Test that markdown emphasis inside math survives conversion ordering
#[test]
fn test_protect_math_withUnderscoresAndAsterisks_shouldHideThemFromMarkdown() {
    let text = "error bound $e_{max} = a * b$ holds";
    let (protected, table) = protect_math(text);

    assert_eq!(table.len(), 1);
    assert!(!protected.contains('_'));
    assert!(!protected.contains('*'));
    assert_eq!(restore_math(&protected, &table), text);
}

/// Test that a lone dollar sign is left untouched
#[test]
fn test_protect_math_withUnbalancedDollar_shouldLeaveTextUnchanged() {
    let text = "registration costs $100 this year";
    let (protected, table) = protect_math(text);

    assert!(table.is_empty());
    assert_eq!(protected, text);
}

/// Test that an inline delimiter touching another dollar is not a delimiter
#[test]
fn test_protect_math_withAdjacentDollars_shouldNotMisparse() {
    // "$$x$$" must be one block span, never "$" + inline "x" + "$"
    let text = "before $$x$$ after";
    let (protected, table) = protect_math(text);

    assert_eq!(table.len(), 1);
    assert!(protected.contains("MATHBLOCK0000"));
    assert!(!protected.contains("MATHINLINE"));
    assert_eq!(restore_math(&protected, &table), text);
}

/// Test inline spans never cross a newline
#[test]
fn test_protect_math_withDollarsAcrossLines_shouldNotMatch() {
    let text = "open $a\nb$ close";
    let (protected, table) = protect_math(text);

    assert!(table.is_empty());
    assert_eq!(protected, text);
}

/// Test restore is a no-op on text with no placeholders
#[test]
fn test_restore_math_withEmptyTable_shouldReturnInputUnchanged() {
    let (protected, table) = protect_math("plain prose");
    assert_eq!(restore_math(&protected, &table), "plain prose");
}
