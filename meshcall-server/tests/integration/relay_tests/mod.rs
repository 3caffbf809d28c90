mod test_room_broadcasts;
