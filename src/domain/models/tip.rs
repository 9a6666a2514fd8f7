use serde::Serialize;

/// A short waste-handling tip shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WasteTip {
    pub title: &'static str,
    pub content: &'static str,
}

pub const WASTE_TIPS: [WasteTip; 4] = [
    WasteTip {
        title: "Recycle Paper & Cardboard",
        content: "Always flatten cardboard boxes, remove staples, and recycle clean paper products.",
    },
    WasteTip {
        title: "Sort Plastics Correctly",
        content: "Check recycling symbols and separate plastics by type to ensure proper processing.",
    },
    WasteTip {
        title: "Compost Your Organics",
        content: "Food scraps, garden waste, and organic matter can be composted to reduce landfill waste.",
    },
    WasteTip {
        title: "Handle E-Waste Safely",
        content: "Electronics should be recycled at certified e-waste facilities to prevent harmful chemicals from leaking.",
    },
];

/// Look up a tip by its 1-based position.
pub fn waste_tip(number: usize) -> Option<&'static WasteTip> {
    number.checked_sub(1).and_then(|index| WASTE_TIPS.get(index))
}
