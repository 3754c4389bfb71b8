#[cfg(test)]
mod tests {
    use crate::ast::{Block, BlockKind, PatternAst, QuantifiedBlock, Span};
    use crate::parser::{ParseErrorKind, parse_pattern};

    fn class_flags(block: &Block) -> &str {
        match &block.kind {
            BlockKind::Class { flags } => flags,
            other => panic!("expected class block, got {:?}", other),
        }
    }

    fn sequence(ast: &PatternAst) -> &[QuantifiedBlock] {
        match ast {
            PatternAst::Sequence(nodes) => nodes,
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn parse_bare_class() {
        let ast = parse_pattern("[0100]").unwrap();
        match &ast {
            PatternAst::Bare(b) => {
                assert_eq!(class_flags(b), "0100");
                assert_eq!(b.span, Span::new(0, 6));
            }
            _ => panic!("expected bare block"),
        }
    }

    #[test]
    fn parse_single_quantified_class() {
        let ast = parse_pattern("[0100](3,9)").unwrap();
        let node = match &ast {
            PatternAst::Single(n) => n,
            _ => panic!("expected single node"),
        };
        assert_eq!(class_flags(&node.block), "0100");
        assert_eq!(node.quantifier.bounds(), (3, 9));
        assert!(!node.quantifier.implicit);
        assert_eq!(node.quantifier.span, Span::new(6, 11));
    }

    #[test]
    fn fixed_quantifier_expands_to_both_bounds() {
        let ast = parse_pattern("[1000](7)").unwrap();
        match &ast {
            PatternAst::Single(n) => {
                assert_eq!(n.quantifier.min, 7);
                assert_eq!(n.quantifier.max, None);
                assert_eq!(n.quantifier.bounds(), (7, 7));
            }
            _ => panic!("expected single node"),
        }
    }

    #[test]
    fn parse_sequence_keeps_source_order() {
        let ast = parse_pattern("[1000](1)[0100](3,9)[0010](2)").unwrap();
        let nodes = sequence(&ast);
        assert_eq!(nodes.len(), 3);
        assert_eq!(class_flags(&nodes[0].block), "1000");
        assert_eq!(class_flags(&nodes[1].block), "0100");
        assert_eq!(class_flags(&nodes[2].block), "0010");
        assert_eq!(nodes[1].quantifier.bounds(), (3, 9));
    }

    #[test]
    fn literal_alone_gets_implicit_quantifier() {
        let ast = parse_pattern("<Activity>").unwrap();
        let node = match &ast {
            PatternAst::Single(n) => n,
            _ => panic!("expected single node"),
        };
        match &node.block.kind {
            BlockKind::Literal { text } => assert_eq!(text, "Activity"),
            _ => panic!("expected literal"),
        }
        assert!(node.quantifier.implicit);
        assert_eq!(node.quantifier.bounds(), (1, 1));
        assert_eq!(node.quantifier.span, Span::new(10, 10));
    }

    #[test]
    fn literal_in_sequence() {
        let ast = parse_pattern("{[1000](1)[0100](3,9)}(1,2)<Activity>").unwrap();
        let nodes = sequence(&ast);
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0].block.kind, BlockKind::Group { .. }));
        assert_eq!(nodes[0].quantifier.bounds(), (1, 2));
        assert!(matches!(
            &nodes[1].block.kind,
            BlockKind::Literal { text } if text == "Activity"
        ));
    }

    #[test]
    fn parse_group_body_is_recursive() {
        let ast = parse_pattern("{[1000](1)[0100](3,9)}(2,3)").unwrap();
        let node = match &ast {
            PatternAst::Single(n) => n,
            _ => panic!("expected single node"),
        };
        assert_eq!(node.quantifier.bounds(), (2, 3));
        let body = match &node.block.kind {
            BlockKind::Group { body } => body,
            _ => panic!("expected group"),
        };
        let inner = sequence(body);
        assert_eq!(inner.len(), 2);
        assert_eq!(class_flags(&inner[0].block), "1000");
        assert_eq!(inner[1].quantifier.bounds(), (3, 9));
    }

    #[test]
    fn group_body_shape_is_preserved() {
        // single quantified child
        let ast = parse_pattern("{<_>}(3)").unwrap();
        match &ast {
            PatternAst::Single(n) => match &n.block.kind {
                BlockKind::Group { body } => {
                    assert!(matches!(**body, PatternAst::Single(_)))
                }
                _ => panic!("expected group"),
            },
            _ => panic!("expected single node"),
        }

        // unquantified child
        let ast = parse_pattern("{[0010]}(4)").unwrap();
        match &ast {
            PatternAst::Single(n) => match &n.block.kind {
                BlockKind::Group { body } => assert!(matches!(**body, PatternAst::Bare(_))),
                _ => panic!("expected group"),
            },
            _ => panic!("expected single node"),
        }
    }

    #[test]
    fn nested_groups_one_per_level() {
        let ast = parse_pattern("[0100](7,11){<_>{[0100](1)}(2)}(0,1)").unwrap();
        let nodes = sequence(&ast);
        assert_eq!(nodes.len(), 2);
        let outer = match &nodes[1].block.kind {
            BlockKind::Group { body } => body,
            _ => panic!("expected group"),
        };
        let inner = sequence(outer);
        assert!(matches!(inner[1].block.kind, BlockKind::Group { .. }));
        assert_eq!(inner[1].quantifier.bounds(), (2, 2));
    }

    #[test]
    fn class_contents_are_not_validated_here() {
        let ast = parse_pattern("[01](2)").unwrap();
        match &ast {
            PatternAst::Single(n) => assert_eq!(class_flags(&n.block), "01"),
            _ => panic!("expected single node"),
        }
    }

    #[test]
    fn inverted_range_still_parses() {
        let ast = parse_pattern("[0100](9,3)").unwrap();
        match &ast {
            PatternAst::Single(n) => assert_eq!(n.quantifier.bounds(), (9, 3)),
            _ => panic!("expected single node"),
        }
    }

    #[test]
    fn parse_is_deterministic() {
        let p = "[0100](7,13){[1000](1)[0100](6,12)}(0,2)";
        assert_eq!(parse_pattern(p).unwrap(), parse_pattern(p).unwrap());
    }

    // ===== Malformed patterns =====

    #[test]
    fn empty_pattern_is_rejected() {
        let err = parse_pattern("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyPattern);
    }

    #[test]
    fn empty_group_is_rejected() {
        let err = parse_pattern("{}(2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyGroup);
    }

    #[test]
    fn odd_item_count_is_rejected() {
        let err = parse_pattern("[1000][0100](3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OddItemCount(3));

        let err = parse_pattern("[1000](1)[0100]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OddItemCount(3));
    }

    #[test]
    fn quantifier_after_literal_is_not_consumed() {
        // `(3)` is a stray quantifier: literal, implicit (1), (3) → 3 items.
        let err = parse_pattern("<Activity>(3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OddItemCount(3));

        let err = parse_pattern("<a>(2)(3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedBlock);
    }

    #[test]
    fn two_blocks_without_quantifiers_are_rejected() {
        let err = parse_pattern("[1000][0100]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedQuantifier);
        assert_eq!(err.at, 6);
    }

    #[test]
    fn lone_quantifier_is_rejected() {
        let err = parse_pattern("(3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedBlock);
    }

    #[test]
    fn second_group_at_same_level_is_rejected() {
        let err = parse_pattern("{[1000](1)}(1){[0100](1)}(1)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MultipleGroups);
        assert_eq!(err.at, 14);
        assert!(err.message.contains("byte 0"));
    }

    #[test]
    fn unmatched_braces_are_rejected() {
        let err = parse_pattern("{[1000](1)(2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.at, 0);

        let err = parse_pattern("[1000](1)}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.at, 9);
    }

    #[test]
    fn unmatched_brackets_fail_in_tokenizer() {
        for p in ["[1000", "1000]", "<abc", "abc>", "[1000](1", "[1000]1)"] {
            let err = parse_pattern(p).unwrap_err();
            assert!(
                matches!(
                    err.kind,
                    ParseErrorKind::TokenizeFailed | ParseErrorKind::UnexpectedEof
                ),
                "{p}: {:?}",
                err.kind
            );
        }
    }

    #[test]
    fn malformed_quantifiers_are_rejected() {
        let err = parse_pattern("[1000]()").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedToken("NUMBER"));

        let err = parse_pattern("[1000](1,)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedToken("NUMBER"));

        let err = parse_pattern("[1000](1,2,3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedToken("')'"));

        let err = parse_pattern("[1000](99999999999)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
    }

    #[test]
    fn errors_render_with_offsets() {
        let err = parse_pattern("[1000][0100]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a quantifier before this block (at byte 6)"
        );

        let err = parse_pattern("]").unwrap_err();
        assert_eq!(err.to_string(), "unmatched ']' at byte 0");
    }
}
