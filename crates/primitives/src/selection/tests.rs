use super::*;
use crate::Block;

fn doc() -> Document {
	// title "Ab" [0..4), separator [4..5), paragraph "Cd" [5..9)
	Document::from_blocks([Block::title("Ab"), Block::separator(), Block::paragraph("Cd")])
}

#[test]
fn point_selection() {
	let sel = Selection::point(5);
	assert!(sel.is_point());
	assert_eq!(sel.from(), 5);
	assert_eq!(sel.to(), 5);
}

#[test]
fn backward_selection_bounds() {
	let sel = Selection::single(9, 3);
	assert_eq!(sel.from(), 3);
	assert_eq!(sel.to(), 9);
	assert!(!sel.is_point());
}

#[test]
fn near_keeps_text_positions() {
	assert_eq!(Selection::near(&doc(), 2), Selection::point(2));
	assert_eq!(Selection::near(&doc(), 8), Selection::point(8));
}

#[test]
fn near_skips_separator_forward() {
	assert_eq!(Selection::near(&doc(), 4), Selection::point(6));
	assert_eq!(Selection::near(&doc(), 0), Selection::point(1));
}

#[test]
fn near_falls_back_to_previous_block() {
	let doc = Document::from_blocks([Block::title("Ab"), Block::separator()]);
	assert_eq!(Selection::near(&doc, 5), Selection::point(3));
}

#[test]
fn near_in_empty_document() {
	assert_eq!(Selection::near(&Document::new(), 7), Selection::point(0));
}

#[test]
fn snapped_repairs_only_invalid_ends() {
	let doc = doc();
	assert_eq!(Selection::single(1, 8).snapped(&doc), Selection::single(1, 8));
	assert_eq!(Selection::point(4).snapped(&doc), Selection::point(6));
	assert_eq!(Selection::single(1, 40).snapped(&doc), Selection::single(1, 8));
}
