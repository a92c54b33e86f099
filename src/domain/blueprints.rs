//! Stock scaffold blueprints: the default rig hierarchy template, the
//! utility-node alias registry, and the control-color palette.

use crate::domain::description::NodeDesc;

/// Root name placeholder in the default template; replaced by the rig name
/// when a bare-string description is built.
pub const ROOT_PLACEHOLDER: &str = "RigRootName";

/// The stock rig scaffold hierarchy.
pub fn default_rig_hierarchy() -> NodeDesc {
    NodeDesc::branch(
        ROOT_PLACEHOLDER,
        vec![
            NodeDesc::branch(
                "GLOBAL_MOVE",
                vec![
                    NodeDesc::leaf("CTL"),
                    NodeDesc::leaf("IK"),
                    NodeDesc::branch("JNT", vec![NodeDesc::leaf("BONE"), NodeDesc::leaf("DRIVER")]),
                ],
            ),
            NodeDesc::branch(
                "GEO",
                vec![
                    NodeDesc::leaf("ANIM_PROXY"),
                    NodeDesc::leaf("EXTRAS"),
                    NodeDesc::leaf("RENDER"),
                ],
            ),
            NodeDesc::branch(
                "PLACEMENT",
                vec![NodeDesc::branch(
                    "Global_CTL",
                    vec![NodeDesc::leaf("Local_CTL")],
                )],
            ),
            NodeDesc::branch(
                "MISC_NODES",
                vec![
                    NodeDesc::leaf("DELETE_BEFORE_PUBLISH"),
                    NodeDesc::leaf("NODES_TO_HIDE"),
                    NodeDesc::leaf("NODES_TO_SHOW"),
                ],
            ),
            NodeDesc::leaf("SCRIPT_NODES"),
            NodeDesc::branch(
                "DEFORMER",
                vec![
                    NodeDesc::branch(
                        "BLENDSHAPES",
                        vec![
                            NodeDesc::leaf("LIVE_SHAPES"),
                            NodeDesc::leaf("RIBBONS"),
                            NodeDesc::leaf("SHAPES_TO_DELETE"),
                        ],
                    ),
                    NodeDesc::leaf("CUSTOM_SYSTEMS"),
                    NodeDesc::leaf("DEFORMER_HANDLE"),
                    NodeDesc::leaf("NONSCALE_JNTS"),
                ],
            ),
        ],
    )
}

/// Resolves a rigging shorthand (or a full type name) to the host node type.
pub fn node_type(alias: &str) -> Option<&'static str> {
    let node_type = match alias {
        "ADL" | "addDoubleLinear" => "addDoubleLinear",
        "blendROT" | "animBlendNodeAdditiveRotation" => "animBlendNodeAdditiveRotation",
        "BLC" | "blendColors" => "blendColors",
        "BTA" | "blendTwoAttr" => "blendTwoAttr",
        "CFME" | "curveFromMeshEdge" => "curveFromMeshEdge",
        "CLMP" | "clamp" => "clamp",
        "CMPM" | "composeMatrix" => "composeMatrix",
        "CND" | "condition" => "condition",
        "CPOS" | "closestPointOnSurface" => "closestPointOnSurface",
        "curveInfo" => "curveInfo",
        "DCPM" | "decomposeMatrix" => "decomposeMatrix",
        "DIST" | "distanceBetween" => "distanceBetween",
        "4x4M" | "FBFM" | "fourByFourMatrix" => "fourByFourMatrix",
        "INVM" | "inverseMatrix" => "inverseMatrix",
        "LOFT" | "loft" => "loft",
        "MDIV" | "multiplyDivide" => "multiplyDivide",
        "MDL" | "multDoubleLinear" => "multDoubleLinear",
        "MM" | "multMatrix" => "multMatrix",
        "PMA" | "plusMinusAverage" => "plusMinusAverage",
        "PMM" | "pointMatrixMult" => "pointMatrixMult",
        "POCI" | "pointOnCurveInfo" => "pointOnCurveInfo",
        "POSI" | "pointOnSurfaceInfo" => "pointOnSurfaceInfo",
        "REV" | "reverse" => "reverse",
        "RMPV" | "remapValue" => "remapValue",
        "SR" | "setRange" => "setRange",
        "UC" | "unitConversion" => "unitConversion",
        "VP" | "VECP" | "vectorProduct" => "vectorProduct",
        "WAM" | "wtAddMatrix" => "wtAddMatrix",
        _ => return None,
    };
    Some(node_type)
}

/// An RGB color, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f32; 3]);

/// Named control-color palette used to distinguish rig controls.
pub fn control_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "red" => [1.0, 0.0, 0.0],
        "pink" => [1.0, 0.5, 0.5],
        "orange" => [1.0, 0.4, 0.0],
        "yellow" => [1.0, 1.0, 0.0],
        "green" => [0.0, 1.0, 0.0],
        "cyan" => [0.0, 1.0, 1.0],
        "blue" => [0.0, 0.0, 1.0],
        "magenta" | "purple" => [1.0, 0.0, 1.0],
        "white" => [1.0, 1.0, 1.0],
        "grey" => [0.6, 0.6, 0.6],
        _ => return None,
    };
    Some(Rgb(rgb))
}
