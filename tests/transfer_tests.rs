mod util;
use util::*;

use brick_sort::algs::communicator::{CommTag, Communicator};
use brick_sort::algs::transfer::{recv_block, send_block, swap_blocks};
use brick_sort::sort_error::BrickSortError;
use serial_test::serial;

#[test]
#[serial]
fn block_roundtrip_between_two_ranks() {
    let tag = CommTag::new(0x0300);
    let results = run_world(2, move |comm| {
        if comm.rank() == 0 {
            send_block(&comm, 1, tag, &[3, 1, 4, 1, 5]);
            Ok(Vec::new())
        } else {
            recv_block(&comm, 0, tag)
        }
    });
    assert_eq!(results[1], Ok(vec![3, 1, 4, 1, 5]));
}

#[test]
#[serial]
fn empty_block_roundtrip() {
    let tag = CommTag::new(0x0310);
    let results = run_world(2, move |comm| {
        if comm.rank() == 0 {
            send_block(&comm, 1, tag, &[]);
            Ok(Vec::new())
        } else {
            recv_block(&comm, 0, tag)
        }
    });
    assert_eq!(results[1], Ok(Vec::new()));
}

#[test]
#[serial]
fn swap_is_symmetric_and_deadlock_free() {
    let tag = CommTag::new(0x0320);
    let results = run_world(2, move |comm| {
        let mine: Vec<i64> = if comm.rank() == 0 {
            vec![1, 3, 5]
        } else {
            vec![2, 4, 6, 8]
        };
        swap_blocks(&comm, 1 - comm.rank(), tag, &mine)
    });
    assert_eq!(results[0], Ok(vec![2, 4, 6, 8]));
    assert_eq!(results[1], Ok(vec![1, 3, 5]));
}

#[test]
#[serial]
fn malformed_count_header_is_a_comm_error() {
    let tag = CommTag::new(0x0330);
    let results = run_world(2, move |comm| {
        if comm.rank() == 0 {
            // three bytes cannot be a count header
            comm.isend(1, tag.header(), &[1, 2, 3]);
            Ok(Vec::new())
        } else {
            recv_block(&comm, 0, tag)
        }
    });
    assert!(matches!(
        results[1],
        Err(BrickSortError::CommError { neighbor: 0, .. })
    ));
}

#[test]
#[serial]
fn short_payload_is_a_payload_error() {
    let tag = CommTag::new(0x0340);
    let results = run_world(2, move |comm| {
        if comm.rank() == 0 {
            // announce two elements, deliver one
            comm.isend(1, tag.header(), &2u32.to_le_bytes());
            comm.isend(1, tag.payload(), &7i64.to_le_bytes());
            Ok(Vec::new())
        } else {
            recv_block(&comm, 0, tag)
        }
    });
    assert_eq!(
        results[1],
        Err(BrickSortError::PayloadSize {
            neighbor: 0,
            expected: 16,
            got: 8
        })
    );
}
