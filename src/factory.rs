//! Box factory - projects a classified node into its kind payload.
//!
//! Only three kinds read host data:
//! - BUTTON from the instance's component properties (required keys)
//! - IMAGE from the main component's name (optional)
//! - COLUMN from variant properties (every axis defaulted)
//!
//! All other kinds carry nothing beyond the discriminator.

use crate::error::MissingPropertyError;
use crate::model::{BoxKind, ButtonBox, ColumnBox, ComponentType, ImageBox};
use scene_types::{SceneNode, VariantProperties};

const LABEL_PREFIX: &str = "Label";
const SIZE_KEY: &str = "Size";
const ON_CLICK_KEY: &str = "OnClick";
const VARIANT_KEY: &str = "Variant";

/// Literal text emitted for an absent COLUMN axis.
pub const NULL_TEXT: &str = "null";
const TRUE_TEXT: &str = "True";

/// Build the payload for `node` classified as `ty`.
///
/// Fails only for BUTTON, when a required component property is absent.
pub fn project<N: SceneNode>(
    node: &N,
    ty: ComponentType,
) -> Result<BoxKind, MissingPropertyError> {
    let kind = match ty {
        ComponentType::Button => BoxKind::Button(button_box(node)?),
        ComponentType::Image => BoxKind::Image(image_box(node)),
        ComponentType::Column => BoxKind::Column(column_box(node)),
        ComponentType::Row => BoxKind::Row,
        ComponentType::Modal => BoxKind::Modal,
        ComponentType::Text => BoxKind::Text,
        ComponentType::Rectangle => BoxKind::Rectangle,
        ComponentType::Unknown => BoxKind::Unknown,
        ComponentType::Vector => BoxKind::Vector,
    };
    Ok(kind)
}

fn button_box<N: SceneNode>(node: &N) -> Result<ButtonBox, MissingPropertyError> {
    let missing = |key: &str| MissingPropertyError {
        node_id: node.id().to_string(),
        node_name: node.name().to_string(),
        key: key.to_string(),
    };

    let properties = node
        .component_properties()
        .ok_or_else(|| missing(&format!("{}*", LABEL_PREFIX)))?;

    // First label-prefixed key in host order wins.
    let label = properties
        .iter()
        .find(|(key, _)| key.starts_with(LABEL_PREFIX))
        .map(|(_, property)| property.value.to_string())
        .ok_or_else(|| missing(&format!("{}*", LABEL_PREFIX)))?;

    let fixed = |key: &str| {
        properties
            .get(key)
            .map(|property| property.value.to_string())
            .ok_or_else(|| missing(key))
    };

    Ok(ButtonBox {
        label,
        size: fixed(SIZE_KEY)?,
        on_click: fixed(ON_CLICK_KEY)?,
        variant: fixed(VARIANT_KEY)?,
        is_full_width: true,
    })
}

fn image_box<N: SceneNode>(node: &N) -> ImageBox {
    ImageBox {
        name: node.main_component().map(|main| main.name().to_string()),
    }
}

fn column_box<N: SceneNode>(node: &N) -> ColumnBox {
    let axes = node.variant_properties();
    let text = |key: &str, default: &str| variant_text(axes, key, default);
    let flag = |key: &str| variant_flag(axes, key);

    ColumnBox {
        vertical_arrangement: text("VerticalArrangement", "Top"),
        horizontal_alignment: text("HorizontalAlignment", "Start"),
        fill_max_size: flag("FillMaxSize"),
        fill_max_height: flag("FillMaxHeight"),
        fill_max_width: flag("FillMaxWidth"),
        padding: text("Padding", NULL_TEXT),
        margin: text("Margin", NULL_TEXT),
        background: text("Background", NULL_TEXT),
        weight: text("Weight", NULL_TEXT),
        height: text("Height", NULL_TEXT),
        width: text("Width", NULL_TEXT),
        design_variant: text("DesignVariant", NULL_TEXT),
    }
}

fn variant_text(axes: Option<&VariantProperties>, key: &str, default: &str) -> String {
    axes.and_then(|axes| axes.get(key))
        .map(String::as_str)
        .unwrap_or(default)
        .to_string()
}

/// True only for the exact text `"True"`; absent axes read as false.
fn variant_flag(axes: Option<&VariantProperties>, key: &str) -> bool {
    axes.and_then(|axes| axes.get(key))
        .is_some_and(|value| value == TRUE_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scene_types::{ComponentProperty, DocumentExport, ExportNode, NodeKind, SceneDocument};

    fn single(node: ExportNode) -> SceneDocument {
        SceneDocument::from_export(DocumentExport::new(vec![node])).unwrap()
    }

    fn button_node() -> ExportNode {
        ExportNode::new("b", NodeKind::Instance, "Button")
            .with_component_property("LabelText", ComponentProperty::text("Go"))
            .with_component_property("Size", ComponentProperty::text("M"))
            .with_component_property("OnClick", ComponentProperty::text("submit"))
            .with_component_property("Variant", ComponentProperty::text("primary"))
    }

    fn project_root(
        doc: &SceneDocument,
        ty: ComponentType,
    ) -> Result<BoxKind, MissingPropertyError> {
        project(&doc.selection()[0], ty)
    }

    #[test]
    fn test_button_projection() {
        let d = single(button_node());
        let kind = project_root(&d, ComponentType::Button).unwrap();
        assert_eq!(
            kind,
            BoxKind::Button(ButtonBox {
                label: "Go".into(),
                size: "M".into(),
                on_click: "submit".into(),
                variant: "primary".into(),
                is_full_width: true,
            })
        );
    }

    #[test]
    fn test_button_first_label_key_wins() {
        let node = ExportNode::new("b", NodeKind::Instance, "Button")
            .with_component_property("Size", ComponentProperty::text("S"))
            .with_component_property("Label#2:1", ComponentProperty::text("Second"))
            .with_component_property("LabelAlt", ComponentProperty::text("Third"))
            .with_component_property("OnClick", ComponentProperty::text("noop"))
            .with_component_property("Variant", ComponentProperty::text("ghost"));
        let kind = project_root(&single(node), ComponentType::Button).unwrap();
        match kind {
            BoxKind::Button(button) => assert_eq!(button.label, "Second"),
            other => panic!("expected button, got {:?}", other),
        }
    }

    #[test]
    fn test_button_without_label_fails() {
        let node = ExportNode::new("b", NodeKind::Instance, "Button")
            .with_component_property("Text", ComponentProperty::text("Go"))
            .with_component_property("Size", ComponentProperty::text("M"))
            .with_component_property("OnClick", ComponentProperty::text("submit"))
            .with_component_property("Variant", ComponentProperty::text("primary"));
        let err = project_root(&single(node), ComponentType::Button).unwrap_err();
        assert_eq!(
            err,
            MissingPropertyError {
                node_id: "b".into(),
                node_name: "Button".into(),
                key: "Label*".into(),
            }
        );
    }

    #[test]
    fn test_button_missing_fixed_key_names_it() {
        let mut node = button_node();
        if let Some(props) = node.component_properties.as_mut() {
            props.shift_remove("OnClick");
        }
        let err = project_root(&single(node), ComponentType::Button).unwrap_err();
        assert_eq!(err.key, "OnClick");
        assert_eq!(err.to_string(), "Missing property 'OnClick' on node 'Button' (b)");
    }

    #[test]
    fn test_button_without_properties_fails() {
        let node = ExportNode::new("b", NodeKind::Instance, "Button");
        let err = project_root(&single(node), ComponentType::Button).unwrap_err();
        assert_eq!(err.key, "Label*");
    }

    #[test]
    fn test_button_toggle_value_renders_as_text() {
        let node = button_node().with_component_property("Variant", ComponentProperty::flag(true));
        match project_root(&single(node), ComponentType::Button).unwrap() {
            BoxKind::Button(button) => assert_eq!(button.variant, "true"),
            other => panic!("expected button, got {:?}", other),
        }
    }

    #[test]
    fn test_image_takes_main_component_name() {
        let d = SceneDocument::from_export(DocumentExport::new(vec![
            ExportNode::new("mc", NodeKind::Component, "Icon/Star"),
            ExportNode::new("i", NodeKind::Instance, "Star").with_main_component("mc"),
        ]))
        .unwrap();
        let kind = project(&d.get("i").unwrap(), ComponentType::Image).unwrap();
        assert_eq!(
            kind,
            BoxKind::Image(ImageBox {
                name: Some("Icon/Star".into())
            })
        );
    }

    #[test]
    fn test_image_without_main_component() {
        let d = single(ExportNode::new("i", NodeKind::Instance, "Star"));
        let kind = project_root(&d, ComponentType::Image).unwrap();
        assert_eq!(kind, BoxKind::Image(ImageBox { name: None }));
    }

    #[test]
    fn test_column_defaults() {
        for node in [
            ExportNode::new("c", NodeKind::Instance, "Column"),
            ExportNode::new("c", NodeKind::Instance, "Column").with_variant_property("Other", "x"),
        ] {
            let kind = project_root(&single(node), ComponentType::Column).unwrap();
            assert_eq!(
                kind,
                BoxKind::Column(ColumnBox {
                    vertical_arrangement: "Top".into(),
                    horizontal_alignment: "Start".into(),
                    fill_max_size: false,
                    fill_max_height: false,
                    fill_max_width: false,
                    padding: "null".into(),
                    margin: "null".into(),
                    background: "null".into(),
                    weight: "null".into(),
                    height: "null".into(),
                    width: "null".into(),
                    design_variant: "null".into(),
                })
            );
        }
    }

    #[test]
    fn test_column_reads_variant_axes() {
        let node = ExportNode::new("c", NodeKind::Instance, "Column")
            .with_variant_property("VerticalArrangement", "SpaceBetween")
            .with_variant_property("HorizontalAlignment", "CenterHorizontally")
            .with_variant_property("FillMaxSize", "True")
            .with_variant_property("FillMaxHeight", "true")
            .with_variant_property("FillMaxWidth", "False")
            .with_variant_property("Padding", "16")
            .with_variant_property("Background", "Surface")
            .with_variant_property("DesignVariant", "Card");
        let kind = project_root(&single(node), ComponentType::Column).unwrap();
        let BoxKind::Column(column) = kind else {
            panic!("expected column");
        };
        assert_eq!(column.vertical_arrangement, "SpaceBetween");
        assert_eq!(column.horizontal_alignment, "CenterHorizontally");
        assert!(column.fill_max_size);
        assert!(!column.fill_max_height, "only the exact text True is true");
        assert!(!column.fill_max_width);
        assert_eq!(column.padding, "16");
        assert_eq!(column.margin, "null");
        assert_eq!(column.background, "Surface");
        assert_eq!(column.design_variant, "Card");
    }

    #[test]
    fn test_plain_kinds_read_nothing() {
        // A node with a broken button setup still projects fine as any other kind.
        let d = single(ExportNode::new("x", NodeKind::Instance, "Button"));
        let cases = [
            (ComponentType::Row, BoxKind::Row),
            (ComponentType::Modal, BoxKind::Modal),
            (ComponentType::Text, BoxKind::Text),
            (ComponentType::Rectangle, BoxKind::Rectangle),
            (ComponentType::Unknown, BoxKind::Unknown),
            (ComponentType::Vector, BoxKind::Vector),
        ];
        for (ty, expected) in cases {
            assert_eq!(project_root(&d, ty).unwrap(), expected);
        }
    }
}
