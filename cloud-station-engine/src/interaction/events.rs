use crate::interaction::fish::FishId;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;

/// Where a hill selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Pointer,
    Rpc,
}

/// A hill was picked, either by clicking it or from the host page.
#[derive(Event, Debug, Clone, Copy)]
pub struct HillSelected {
    pub hill: HillKey,
    pub source: SelectionSource,
}

/// The "next" control was pressed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NextHillRequested;

/// The "exit zoom" control was pressed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ExitZoomRequested;

/// A fish finished its travel curve and now rests at its hill pose.
#[derive(Event, Debug, Clone, Copy)]
pub struct FishArrived {
    pub fish: FishId,
    pub hill: HillKey,
}

/// An exit finished. `fish` is `None` when there was no fish left to swim away.
#[derive(Event, Debug, Clone, Copy)]
pub struct FishExited {
    pub fish: Option<FishId>,
}

/// What a camera transition was heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTarget {
    Hill(HillKey),
    Home,
}

/// Sent once when a camera transition reaches its target. Cancelled
/// transitions never send it.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraTransitionFinished {
    pub target: CameraTarget,
}
