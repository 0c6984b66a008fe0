mod faults;
mod ordering;
mod roundtrip;
