//! HID report descriptor for the two joysticks.
//!
//! Both sticks live under one Joystick application collection, each in its
//! own sub-collection with its own report ID. Per report:
//!
//! | byte | field                                   |
//! |------|-----------------------------------------|
//! | 0    | X axis, 0..=255                         |
//! | 1    | Y axis, 0..=255                         |
//! | 2    | buttons 1-8                             |
//! | 3    | buttons 9-16                            |
//! | 4    | vendor defined, 8 x 1 bit, always zero  |

use crate::report::REPORT_PAYLOAD_LEN;

pub const JOYSTICK1_REPORT_ID: u8 = 0x01;
pub const JOYSTICK2_REPORT_ID: u8 = 0x02;

#[rustfmt::skip]
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01,                     // Usage Page (Generic Desktop)
    0x09, 0x04,                     // Usage (Joystick)
    0xa1, 0x01,                     // Collection (Application)

    // player 1
    0xa1, 0x02,                     //   Collection (Logical)
    0x85, JOYSTICK1_REPORT_ID,      //     Report ID (1)
    0x75, 0x08,                     //     Report Size (8)
    0x95, 0x02,                     //     Report Count (2)
    0x26, 0xff, 0x00,               //     Logical Maximum (255)
    0x35, 0x00,                     //     Physical Minimum (0)
    0x46, 0xff, 0x00,               //     Physical Maximum (255)
    0x09, 0x30,                     //     Usage (X)
    0x09, 0x31,                     //     Usage (Y)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0x65, 0x00,                     //     Unit (None)
    0x75, 0x01,                     //     Report Size (1)
    0x95, 0x10,                     //     Report Count (16)
    0x25, 0x01,                     //     Logical Maximum (1)
    0x45, 0x01,                     //     Physical Maximum (1)
    0x05, 0x09,                     //     Usage Page (Button)
    0x19, 0x01,                     //     Usage Minimum (Button 1)
    0x29, 0x10,                     //     Usage Maximum (Button 16)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0x06, 0x00, 0xff,               //     Usage Page (Vendor Defined 0xFF00)
    0x75, 0x01,                     //     Report Size (1)
    0x95, 0x08,                     //     Report Count (8)
    0x25, 0x01,                     //     Logical Maximum (1)
    0x45, 0x01,                     //     Physical Maximum (1)
    0x09, 0x01,                     //     Usage (Vendor Usage 1)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0xc0,                           //   End Collection

    // player 2
    0xa1, 0x02,                     //   Collection (Logical)
    0x85, JOYSTICK2_REPORT_ID,      //     Report ID (2)
    0x75, 0x08,                     //     Report Size (8)
    0x95, 0x02,                     //     Report Count (2)
    0x26, 0xff, 0x00,               //     Logical Maximum (255)
    0x35, 0x00,                     //     Physical Minimum (0)
    0x46, 0xff, 0x00,               //     Physical Maximum (255)
    0x09, 0x30,                     //     Usage (X)
    0x09, 0x31,                     //     Usage (Y)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0x65, 0x00,                     //     Unit (None)
    0x75, 0x01,                     //     Report Size (1)
    0x95, 0x10,                     //     Report Count (16)
    0x25, 0x01,                     //     Logical Maximum (1)
    0x45, 0x01,                     //     Physical Maximum (1)
    0x05, 0x09,                     //     Usage Page (Button)
    0x19, 0x01,                     //     Usage Minimum (Button 1)
    0x29, 0x10,                     //     Usage Maximum (Button 16)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0x06, 0x00, 0xff,               //     Usage Page (Vendor Defined 0xFF00)
    0x75, 0x01,                     //     Report Size (1)
    0x95, 0x08,                     //     Report Count (8)
    0x25, 0x01,                     //     Logical Maximum (1)
    0x45, 0x01,                     //     Physical Maximum (1)
    0x09, 0x01,                     //     Usage (Vendor Usage 1)
    0x81, 0x02,                     //     Input (Data, Variable, Absolute)
    0xc0,                           //   End Collection

    0xc0,                           // End Collection
];

// Item prefixes with the size bits masked off.
const REPORT_SIZE: u8 = 0x74;
const REPORT_COUNT: u8 = 0x94;
const REPORT_ID: u8 = 0x84;
const INPUT: u8 = 0x80;
const LONG_ITEM: u8 = 0xfe;

/// Number of input bits the descriptor declares for `report_id`.
///
/// Walks the items keeping track of the Report Size, Report Count and
/// Report ID globals and adds `size * count` for every Input item that
/// belongs to `report_id`. Input items seen before any Report ID count
/// towards ID 0. Push/Pop are not tracked, and a truncated trailing item
/// ends the walk.
pub const fn input_report_bits(descriptor: &[u8], report_id: u8) -> usize {
    let mut i = 0;
    let mut size = 0usize;
    let mut count = 0usize;
    let mut current_id = 0u8;
    let mut bits = 0usize;

    while i < descriptor.len() {
        let prefix = descriptor[i];

        if prefix == LONG_ITEM {
            if i + 1 >= descriptor.len() {
                break;
            }
            i += 3 + descriptor[i + 1] as usize;
            continue;
        }

        let len = match prefix & 0x03 {
            3 => 4,
            n => n as usize,
        };
        if i + len >= descriptor.len() {
            break;
        }

        let value = item_data(descriptor, i + 1, len);
        match prefix & 0xfc {
            REPORT_SIZE => size = value as usize,
            REPORT_COUNT => count = value as usize,
            REPORT_ID => current_id = value as u8,
            INPUT => {
                if current_id == report_id {
                    bits += size * count;
                }
            }
            _ => {}
        }

        i += 1 + len;
    }

    bits
}

// Little-endian item payload of `len` bytes starting at `start`.
const fn item_data(descriptor: &[u8], start: usize, len: usize) -> u32 {
    let mut value = 0u32;
    let mut k = 0;
    while k < len {
        value |= (descriptor[start + k] as u32) << (8 * k);
        k += 1;
    }
    value
}

const _: () = {
    assert!(JOYSTICK1_REPORT_ID != 0 && JOYSTICK2_REPORT_ID != 0);
    assert!(JOYSTICK1_REPORT_ID != JOYSTICK2_REPORT_ID);
    assert!(input_report_bits(REPORT_DESCRIPTOR, 0) == 0);
    assert!(input_report_bits(REPORT_DESCRIPTOR, JOYSTICK1_REPORT_ID) == REPORT_PAYLOAD_LEN * 8);
    assert!(input_report_bits(REPORT_DESCRIPTOR, JOYSTICK2_REPORT_ID) == REPORT_PAYLOAD_LEN * 8);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_length() {
        assert_eq!(REPORT_DESCRIPTOR.len(), 119);
    }

    #[test]
    fn collections_are_balanced() {
        // Step item by item so data bytes are never read as prefixes.
        let mut depth = 0i32;
        let mut i = 0;
        while i < REPORT_DESCRIPTOR.len() {
            let prefix = REPORT_DESCRIPTOR[i];
            match prefix {
                0xa1 => depth += 1,
                0xc0 => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0);
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            i += 1 + len;
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn each_report_is_five_bytes() {
        assert_eq!(input_report_bits(REPORT_DESCRIPTOR, JOYSTICK1_REPORT_ID), 40);
        assert_eq!(input_report_bits(REPORT_DESCRIPTOR, JOYSTICK2_REPORT_ID), 40);
        assert_eq!(input_report_bits(REPORT_DESCRIPTOR, 3), 0);
    }

    #[test]
    fn report_ids_follow_the_report_id_tag() {
        let ids: std::vec::Vec<u8> = REPORT_DESCRIPTOR
            .windows(2)
            .filter(|pair| pair[0] == 0x85)
            .map(|pair| pair[1])
            .collect();
        assert_eq!(ids, [JOYSTICK1_REPORT_ID, JOYSTICK2_REPORT_ID]);
    }

    #[test]
    fn bits_without_report_id_count_as_id_zero() {
        #[rustfmt::skip]
        let mouse = [
            0x75, 0x01, 0x95, 0x03, 0x81, 0x02, // 3 button bits
            0x75, 0x05, 0x95, 0x01, 0x81, 0x03, // 5 bits padding
            0x75, 0x08, 0x95, 0x02, 0x81, 0x06, // X, Y
        ];
        assert_eq!(input_report_bits(&mouse, 0), 24);
        assert_eq!(input_report_bits(&mouse, 1), 0);
    }

    #[test]
    fn two_byte_and_long_items_are_skipped() {
        #[rustfmt::skip]
        let desc = [
            0x85, 0x07,
            0x76, 0x10, 0x00,       // Report Size (16), 2-byte data
            0xfe, 0x02, 0x00, 0xaa, 0xbb, // long item
            0x95, 0x01,
            0x81, 0x02,
        ];
        assert_eq!(input_report_bits(&desc, 7), 16);
    }

    #[test]
    fn truncated_item_stops_the_walk() {
        let desc = [0x75, 0x08, 0x95, 0x01, 0x81, 0x02, 0x96, 0x01];
        assert_eq!(input_report_bits(&desc, 0), 8);
    }
}
