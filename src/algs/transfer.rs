//! Point-to-point block transfer: a count header, then the payload frame.
//!
//! Receivers learn the frame length from the header, so no rank needs global
//! size knowledge to post a receive. The combined [`swap_blocks`] posts its
//! receive before its send on both sides, which cannot deadlock regardless of
//! scheduling; send handles are always drained before returning, even on an
//! error path.

use crate::algs::communicator::{CommTag, Communicator, Wait};
use crate::algs::wire::{self, WireCount, WireElem};
use crate::sort_error::BrickSortError;
use std::mem::size_of;

fn decode_header(peer: usize, data: &[u8]) -> Result<usize, BrickSortError> {
    if data.len() != size_of::<WireCount>() {
        return Err(BrickSortError::CommError {
            neighbor: peer,
            source: format!(
                "expected {} byte(s) for count header, got {}",
                size_of::<WireCount>(),
                data.len()
            ),
        });
    }
    Ok(wire::cast_slice_from::<WireCount>(data)[0].get())
}

fn decode_payload(peer: usize, expected: usize, data: &[u8]) -> Result<Vec<i64>, BrickSortError> {
    let expected_bytes = expected * size_of::<WireElem>();
    if data.len() != expected_bytes {
        return Err(BrickSortError::PayloadSize {
            neighbor: peer,
            expected: expected_bytes,
            got: data.len(),
        });
    }
    Ok(wire::decode_block(wire::cast_slice_from::<WireElem>(data)))
}

/// Send one block to `peer`: count header, then payload.
pub fn send_block<C: Communicator>(comm: &C, peer: usize, tag: CommTag, block: &[i64]) {
    let header = WireCount::new(block.len());
    let send_header = comm.isend(peer, tag.header(), wire::cast_slice(std::slice::from_ref(&header)));
    let frame = wire::encode_block(block);
    let send_payload = comm.isend(peer, tag.payload(), wire::cast_slice(&frame));
    let _ = send_header.wait();
    let _ = send_payload.wait();
}

/// Receive one block from `peer`.
pub fn recv_block<C: Communicator>(
    comm: &C,
    peer: usize,
    tag: CommTag,
) -> Result<Vec<i64>, BrickSortError> {
    let mut header_buf = [0u8; size_of::<WireCount>()];
    let recv_header = comm.irecv(peer, tag.header(), &mut header_buf);
    let data = recv_header
        .wait()
        .ok_or_else(|| BrickSortError::recv_failed(peer))?;
    let count = decode_header(peer, &data)?;

    let mut payload_buf = vec![0u8; count * size_of::<WireElem>()];
    let recv_payload = comm.irecv(peer, tag.payload(), &mut payload_buf);
    let data = recv_payload
        .wait()
        .ok_or_else(|| BrickSortError::recv_failed(peer))?;
    decode_payload(peer, count, &data)
}

/// Combined bidirectional transfer: send `mine` to `partner` and receive its
/// block in the same synchronized step.
///
/// Both sides post the header receive before any send, so two partners
/// calling this against each other make progress regardless of ordering.
pub fn swap_blocks<C: Communicator>(
    comm: &C,
    partner: usize,
    tag: CommTag,
    mine: &[i64],
) -> Result<Vec<i64>, BrickSortError> {
    let mut header_buf = [0u8; size_of::<WireCount>()];
    let recv_header = comm.irecv(partner, tag.header(), &mut header_buf);

    let header = WireCount::new(mine.len());
    let send_header = comm.isend(partner, tag.header(), wire::cast_slice(std::slice::from_ref(&header)));
    let frame = wire::encode_block(mine);
    let send_payload = comm.isend(partner, tag.payload(), wire::cast_slice(&frame));

    let theirs = (|| {
        let data = recv_header
            .wait()
            .ok_or_else(|| BrickSortError::recv_failed(partner))?;
        let count = decode_header(partner, &data)?;

        let mut payload_buf = vec![0u8; count * size_of::<WireElem>()];
        let recv_payload = comm.irecv(partner, tag.payload(), &mut payload_buf);
        let data = recv_payload
            .wait()
            .ok_or_else(|| BrickSortError::recv_failed(partner))?;
        decode_payload(partner, count, &data)
    })();

    // Drain send handles before surfacing any receive error.
    let _ = send_header.wait();
    let _ = send_payload.wait();
    theirs
}
