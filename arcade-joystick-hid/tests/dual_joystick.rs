//! Concrete report sequences for the two sticks.

mod common;

use arcade_joystick_hid::{JOYSTICK1_REPORT_ID, JOYSTICK2_REPORT_ID, REPORT_DESCRIPTOR};
use common::joysticks;

#[test]
fn descriptor_is_installed_once_on_construction() {
    let joy = joysticks();
    assert_eq!(joy.transport().descriptor, Some(REPORT_DESCRIPTOR));
    assert!(joy.transport().sent.is_empty());
}

#[test]
fn right_and_fire_on_player_one() {
    let mut joy = joysticks();
    joy.reset();
    joy.p1_right();
    joy.p1_button_press(0x0001);
    joy.usb_update();

    assert_eq!(
        joy.transport().last(JOYSTICK1_REPORT_ID),
        Some([255, 127, 0x01, 0x00, 0x00])
    );
    assert_eq!(
        joy.transport().last(JOYSTICK2_REPORT_ID),
        Some([127, 127, 0x00, 0x00, 0x00])
    );
}

#[test]
fn last_direction_wins_on_an_axis() {
    let mut joy = joysticks();
    joy.p2_up();
    joy.p2_down();
    joy.usb_update();

    assert_eq!(
        joy.transport().last(JOYSTICK2_REPORT_ID),
        Some([127, 255, 0x00, 0x00, 0x00])
    );
}

#[test]
fn high_buttons_land_in_the_fourth_byte() {
    let mut joy = joysticks();
    joy.p2_button_press(0x0100);
    joy.p2_button_press(0x8000);
    joy.p2_left();
    joy.usb_update();

    assert_eq!(
        joy.transport().last(JOYSTICK2_REPORT_ID),
        Some([0, 127, 0x00, 0x81, 0x00])
    );
}

#[test]
fn each_update_sends_one_report_per_stick() {
    let mut joy = joysticks();
    joy.usb_update();
    joy.usb_update();
    joy.usb_update();

    let ids: Vec<u8> = joy.transport().sent.iter().map(|(id, _)| *id).collect();
    assert_eq!(
        ids,
        [
            JOYSTICK1_REPORT_ID,
            JOYSTICK2_REPORT_ID,
            JOYSTICK1_REPORT_ID,
            JOYSTICK2_REPORT_ID,
            JOYSTICK1_REPORT_ID,
            JOYSTICK2_REPORT_ID,
        ]
    );
}

#[test]
fn reset_then_reapply_releases_buttons() {
    let mut joy = joysticks();
    joy.p1_button_press(0x0003);
    joy.usb_update();

    // next cycle: only button 2 still held
    joy.reset();
    joy.p1_button_press(0x0002);
    joy.usb_update();

    assert_eq!(
        joy.transport().last(JOYSTICK1_REPORT_ID),
        Some([127, 127, 0x02, 0x00, 0x00])
    );
}
