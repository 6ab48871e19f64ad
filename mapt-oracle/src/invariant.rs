//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use derive_new::new;
use itertools::Itertools;
use mapt_cmdu::tlv::LinkMetricTlv;
use mapt_utils::mac_addr::MacAddr;

use crate::capture::MessageFilter;
use crate::error::{Error, InvariantViolation};
use crate::message::CapturedMessage;

// Expected event of an ordered exchange.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct ExpectedEvent {
    pub label: String,
    pub filter: MessageFilter,
}

// Direction of the link metrics being verified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkType {
    Transmitter,
    Receiver,
}

// ===== impl LinkType =====

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Transmitter => write!(f, "tx"),
            LinkType::Receiver => write!(f, "rx"),
        }
    }
}

// ===== global functions =====

pub fn assert_non_zero_address(
    value: MacAddr,
    field: &str,
) -> Result<(), Error> {
    if value.is_zero() {
        return Err(InvariantViolation::ZeroAddress(field.to_owned()).into());
    }
    Ok(())
}

pub fn assert_equal<T>(field: &str, expected: &T, found: &T) -> Result<(), Error>
where
    T: PartialEq + std::fmt::Debug + ?Sized,
{
    if expected != found {
        return Err(InvariantViolation::UnexpectedValue {
            field: field.to_owned(),
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        }
        .into());
    }
    Ok(())
}

// Fails listing every key that appears more than once.
pub fn assert_no_duplicates<I, K, F>(
    items: I,
    what: &str,
    key_fn: F,
) -> Result<(), Error>
where
    I: IntoIterator,
    K: Ord + std::fmt::Debug,
    F: Fn(&I::Item) -> K,
{
    let counts = items.into_iter().fold(BTreeMap::new(), |mut counts, item| {
        *counts.entry(key_fn(&item)).or_insert(0) += 1;
        counts
    });
    let duplicates = counts
        .into_iter()
        .filter(|(_, count)| *count != 1)
        .map(|(key, count)| (format!("{key:?}"), count))
        .collect::<Vec<_>>();
    if !duplicates.is_empty() {
        return Err(
            InvariantViolation::Duplicates(what.to_owned(), duplicates).into()
        );
    }
    Ok(())
}

// Compares the observed peers against the expected ones.
//
// Unexpected peers always fail. Expected peers that were never observed fail
// only when `require_all` is set.
pub fn assert_exact_peer_set(
    observed: &[MacAddr],
    expected: &[MacAddr],
    what: &str,
    require_all: bool,
) -> Result<(), Error> {
    let missing = if require_all {
        expected
            .iter()
            .filter(|peer| !observed.contains(peer))
            .copied()
            .unique()
            .collect::<Vec<_>>()
    } else {
        vec![]
    };
    let unexpected = observed
        .iter()
        .filter(|peer| !expected.contains(peer))
        .copied()
        .unique()
        .collect::<Vec<_>>();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(InvariantViolation::PeerSetMismatch {
            what: what.to_owned(),
            missing,
            unexpected,
        }
        .into());
    }
    Ok(())
}

// Checks that the expected events were observed in that relative order.
//
// Unrelated messages in between are tolerated. Each observed message can
// satisfy at most one expected event.
pub fn assert_ordered_acknowledgement<M>(
    expected: &[ExpectedEvent],
    observed: &[M],
) -> Result<(), Error>
where
    M: AsRef<CapturedMessage>,
{
    let mut observed = observed.iter().map(AsRef::<CapturedMessage>::as_ref);
    for (idx, event) in expected.iter().enumerate() {
        if observed.any(|msg| event.filter.matches(msg)) {
            continue;
        }

        let occurrence = expected[..=idx]
            .iter()
            .filter(|prev| prev.label == event.label)
            .count();
        let after = idx.checked_sub(1).map(|prev| expected[prev].label.clone());
        return Err(InvariantViolation::OrderViolation {
            event: event.label.clone(),
            occurrence,
            after,
        }
        .into());
    }
    Ok(())
}

// Verifies the link metric TLVs reported by `responder`.
//
// Checks, in order: the responder identity, at least one interface pair
// with non-zero addresses per TLV, a single link per neighbor, and the
// neighbor set.
pub fn verify_links<T: LinkMetricTlv>(
    links: &[&T],
    responder: MacAddr,
    expected: &[MacAddr],
    link_type: LinkType,
) -> Result<(), Error> {
    for link in links {
        if link.responder_al_mac() != responder {
            return Err(InvariantViolation::UnexpectedValue {
                field: format!("{link_type} link responder"),
                expected: responder.to_string(),
                found: link.responder_al_mac().to_string(),
            }
            .into());
        }
        let pairs = link.interface_pairs();
        if pairs.is_empty() {
            return Err(InvariantViolation::NoInterfaces(
                format!("{link_type} link"),
                link.neighbor_al_mac(),
            )
            .into());
        }
        for (local, neighbor) in pairs {
            assert_non_zero_address(
                local,
                &format!("{link_type} link local interface"),
            )?;
            assert_non_zero_address(
                neighbor,
                &format!("{link_type} link neighbor interface"),
            )?;
        }
    }

    assert_no_duplicates(links, &format!("{link_type} links"), |link| {
        (link.responder_al_mac(), link.neighbor_al_mac())
    })?;

    let observed = links
        .iter()
        .map(|link| link.neighbor_al_mac())
        .collect::<Vec<_>>();
    assert_exact_peer_set(
        &observed,
        expected,
        &format!("{link_type} links"),
        true,
    )
}

// ===== unit tests =====
