/// Short beginner explanation for the first recognised term on a line.
///
/// Matching is case-insensitive and checks, in order: magic ring, `inc`, `dec`, `sc`, `dc`.
pub fn hint_for_line(line: &str) -> Option<&'static str> {
    let line = line.to_lowercase();

    const HINTS: [(&[&str], &str); 5] = [
        (
            &["mr", "magic ring"],
            "MR = Magic Ring: start with 6 stitches in an adjustable ring.",
        ),
        (&["inc"], "inc = increase: work 2 stitches in the same stitch."),
        (
            &["dec"],
            "dec = decrease: work 2 stitches together to reduce count.",
        ),
        (&["sc"], "sc = single crochet: one stitch into the next stitch."),
        (
            &["dc"],
            "dc = double crochet: yarn over, insert hook, pull up a loop, complete the stitch.",
        ),
    ];

    HINTS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| line.contains(n)))
        .map(|(_, hint)| *hint)
}

#[cfg(test)]
#[path = "../../tests/unit/notation/hints.rs"]
mod tests;
